use std::path::PathBuf;
use std::time::Duration;

/// Endpoints, credentials and local paths shared by the store and hub clients.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the Opik REST API (including the `/api` prefix for local installs).
    pub store_url: String,
    /// API key sent as the `authorization` header, if any.
    pub store_api_key: Option<String>,
    /// Workspace sent as the `Comet-Workspace` header, if any.
    pub store_workspace: Option<String>,
    /// Base URL of the datasets-server rows API.
    pub hub_rows_url: String,
    /// Base URL for raw file downloads from the hub.
    pub hub_files_url: String,
    /// Bearer token for the hub.
    pub hub_token: Option<String>,
    /// Directory holding bundled JSON assets.
    pub asset_dir: PathBuf,
    /// Per-request timeout for every HTTP client.
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        let asset_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("benchset")
            .join("assets");
        Self {
            store_url: "http://localhost:5173/api".into(),
            store_api_key: None,
            store_workspace: None,
            hub_rows_url: "https://datasets-server.huggingface.co".into(),
            hub_files_url: "https://huggingface.co".into(),
            hub_token: None,
            asset_dir,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl Settings {
    /// Build settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            store_url: non_empty("OPIK_URL_OVERRIDE").unwrap_or(defaults.store_url),
            store_api_key: non_empty("OPIK_API_KEY"),
            store_workspace: non_empty("OPIK_WORKSPACE"),
            hub_rows_url: non_empty("HF_DATASETS_SERVER_URL").unwrap_or(defaults.hub_rows_url),
            hub_files_url: non_empty("HF_ENDPOINT").unwrap_or(defaults.hub_files_url),
            hub_token: non_empty("HF_TOKEN"),
            asset_dir: non_empty("BENCHSET_ASSET_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.asset_dir),
            request_timeout: non_empty("BENCHSET_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = url.into();
        self
    }

    pub fn with_store_api_key(mut self, key: impl Into<String>) -> Self {
        self.store_api_key = Some(key.into());
        self
    }

    pub fn with_store_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.store_workspace = Some(workspace.into());
        self
    }

    pub fn with_hub_rows_url(mut self, url: impl Into<String>) -> Self {
        self.hub_rows_url = url.into();
        self
    }

    pub fn with_hub_files_url(mut self, url: impl Into<String>) -> Self {
        self.hub_files_url = url.into();
        self
    }

    pub fn with_hub_token(mut self, token: impl Into<String>) -> Self {
        self.hub_token = Some(token.into());
        self
    }

    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
