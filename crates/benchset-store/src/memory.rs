use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use benchset_core::record::DatasetRecord;

use crate::error::StoreError;
use crate::store::{DatasetHandle, DatasetStore};

struct Entry {
    handle: DatasetHandle,
    items: Vec<DatasetRecord>,
}

/// In-process [`DatasetStore`] for offline runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    datasets: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of datasets held.
    pub fn len(&self) -> usize {
        self.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Entry>>, StoreError> {
        self.datasets
            .lock()
            .map_err(|e| StoreError::Request(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl DatasetStore for MemoryStore {
    async fn get_dataset(&self, name: &str) -> Result<Option<DatasetHandle>, StoreError> {
        Ok(self.lock()?.get(name).map(|e| e.handle.clone()))
    }

    async fn create_dataset(&self, name: &str) -> Result<DatasetHandle, StoreError> {
        let mut datasets = self.lock()?;
        if datasets.contains_key(name) {
            return Err(StoreError::Conflict(name.to_string()));
        }
        let handle = DatasetHandle {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            created_at: Some(Utc::now()),
        };
        datasets.insert(
            name.to_string(),
            Entry {
                handle: handle.clone(),
                items: Vec::new(),
            },
        );
        Ok(handle)
    }

    async fn insert_items(
        &self,
        dataset: &DatasetHandle,
        records: &[DatasetRecord],
    ) -> Result<(), StoreError> {
        let mut datasets = self.lock()?;
        let entry = datasets
            .get_mut(&dataset.name)
            .filter(|e| e.handle.id == dataset.id)
            .ok_or_else(|| StoreError::InvalidResponse(format!("unknown dataset {}", dataset.name)))?;
        entry.items.extend(records.iter().cloned());
        Ok(())
    }

    async fn get_items(&self, dataset: &DatasetHandle) -> Result<Vec<DatasetRecord>, StoreError> {
        self.lock()?
            .get(&dataset.name)
            .filter(|e| e.handle.id == dataset.id)
            .map(|e| e.items.clone())
            .ok_or_else(|| StoreError::InvalidResponse(format!("unknown dataset {}", dataset.name)))
    }
}
