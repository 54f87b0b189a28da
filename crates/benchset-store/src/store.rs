use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use benchset_core::record::DatasetRecord;

use crate::error::StoreError;

/// Reference to a dataset persisted by a [`DatasetStore`].
///
/// Only store implementations construct handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetHandle {
    pub id: String,
    /// Storage key the dataset was created under.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Remote storage for named, append-only record collections.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Look up a dataset by name. `Ok(None)` means it does not exist.
    async fn get_dataset(&self, name: &str) -> Result<Option<DatasetHandle>, StoreError>;

    /// Create an empty dataset.
    ///
    /// Fails with [`StoreError::Conflict`] when the name is already taken.
    async fn create_dataset(&self, name: &str) -> Result<DatasetHandle, StoreError>;

    /// Append records to a dataset.
    async fn insert_items(
        &self,
        dataset: &DatasetHandle,
        records: &[DatasetRecord],
    ) -> Result<(), StoreError>;

    /// Read every record in a dataset, in insertion order.
    async fn get_items(&self, dataset: &DatasetHandle) -> Result<Vec<DatasetRecord>, StoreError>;
}
