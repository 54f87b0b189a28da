use std::collections::HashMap;
use std::path::{Path, PathBuf};

use benchset_core::record::DatasetRecord;

use crate::error::HubError;

/// Read-only bundle of named JSON files shipped with the tool.
pub trait AssetBundle: Send + Sync {
    fn read_asset(&self, name: &str) -> Result<String, HubError>;

    /// Read an asset holding a JSON array of objects.
    fn read_records(&self, name: &str) -> Result<Vec<DatasetRecord>, HubError> {
        let text = self.read_asset(name)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Assets stored as files in one directory.
#[derive(Debug, Clone)]
pub struct DirAssets {
    dir: PathBuf,
}

impl DirAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AssetBundle for DirAssets {
    fn read_asset(&self, name: &str) -> Result<String, HubError> {
        // Asset names are bare file names; anything path-like is rejected.
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(HubError::Asset(format!("invalid asset name '{name}'")));
        }
        let path = self.dir.join(name);
        std::fs::read_to_string(&path)
            .map_err(|e| HubError::Asset(format!("{}: {e}", path.display())))
    }
}

/// Assets held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    files: HashMap<String, String>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(name.into(), content.into());
        self
    }
}

impl AssetBundle for StaticAssets {
    fn read_asset(&self, name: &str) -> Result<String, HubError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| HubError::Asset(format!("asset '{name}' not bundled")))
    }
}
