use std::sync::Arc;

use benchset_core::catalog::DatasetName;
use benchset_core::config::Settings;
use benchset_store::opik::OpikStore;
use benchset_store::store::{DatasetHandle, DatasetStore};

use crate::error::ProvisionError;
use crate::loaders::{Sources, load_raw};

/// Outcome of looking a storage key up before provisioning.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The dataset exists and holds records.
    Hit {
        handle: DatasetHandle,
        item_count: usize,
    },
    /// The dataset has to be (re)built.
    Miss(MissReason),
}

/// Why a lookup fell through to provisioning.
#[derive(Debug, Clone, PartialEq)]
pub enum MissReason {
    NotFound,
    LookupFailed(String),
    ItemsUnreadable(String),
    Empty,
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Get-or-create access to catalog datasets in a remote store.
pub struct Provisioner {
    store: Arc<dyn DatasetStore>,
    sources: Sources,
}

impl Provisioner {
    pub fn new(store: Arc<dyn DatasetStore>, sources: Sources) -> Self {
        Self { store, sources }
    }

    /// Opik for storage, Hugging Face for sources.
    pub fn from_settings(settings: &Settings) -> Result<Self, ProvisionError> {
        let store = OpikStore::new(settings)
            .map_err(|e| ProvisionError::ClientInit(format!("dataset store: {e}")))?;
        let sources = Sources::from_settings(settings)
            .map_err(|e| ProvisionError::ClientInit(format!("dataset hub: {e}")))?;
        Ok(Self::new(Arc::new(store), sources))
    }

    pub fn store(&self) -> &Arc<dyn DatasetStore> {
        &self.store
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Check whether a populated dataset already exists.
    ///
    /// Never fails: every lookup error is reported as a [`Lookup::Miss`].
    pub async fn resolve(&self, name: DatasetName, test_mode: bool) -> Lookup {
        let key = name.storage_key(test_mode);
        tracing::info!(dataset = %key, "checking for existing dataset");

        let handle = match self.store.get_dataset(&key).await {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                tracing::info!(dataset = %key, "dataset does not exist");
                return Lookup::Miss(MissReason::NotFound);
            }
            Err(e) => {
                tracing::warn!(dataset = %key, error = %e, "lookup failed, assuming dataset needs creation");
                return Lookup::Miss(MissReason::LookupFailed(e.to_string()));
            }
        };

        match self.store.get_items(&handle).await {
            Ok(items) if !items.is_empty() => {
                tracing::info!(dataset = %key, items = items.len(), "using cached dataset");
                Lookup::Hit {
                    handle,
                    item_count: items.len(),
                }
            }
            Ok(_) => {
                tracing::info!(dataset = %key, "existing dataset has no items, rebuilding");
                Lookup::Miss(MissReason::Empty)
            }
            Err(e) => {
                tracing::warn!(dataset = %key, error = %e, "could not read existing items, rebuilding");
                Lookup::Miss(MissReason::ItemsUnreadable(e.to_string()))
            }
        }
    }

    /// Return a populated dataset for `name`, building it on a cache miss.
    ///
    /// The returned handle held at least one item when it was last read.
    pub async fn provision(
        &self,
        name: DatasetName,
        test_mode: bool,
        seed: u64,
    ) -> Result<DatasetHandle, ProvisionError> {
        if let Lookup::Hit { handle, .. } = self.resolve(name, test_mode).await {
            return Ok(handle);
        }

        let key = name.storage_key(test_mode);
        tracing::info!(dataset = %key, "loading data from source");
        let records = load_raw(&self.sources, name, test_mode, seed).await?;
        if records.is_empty() {
            return Err(ProvisionError::NoData(name));
        }

        let handle = self.create_or_fetch(&key).await?;

        tracing::info!(dataset = %key, items = records.len(), "inserting items");
        self.store
            .insert_items(&handle, &records)
            .await
            .map_err(|source| ProvisionError::Insert {
                key: key.clone(),
                source,
            })?;

        let count = self.verify(&key, &handle).await?;
        tracing::info!(dataset = %key, items = count, "verified items after insert");
        Ok(handle)
    }

    /// [`Provisioner::provision`] for a catalog name given as a string.
    ///
    /// Names outside the catalog fail before any request is made.
    pub async fn provision_by_name(
        &self,
        name: &str,
        test_mode: bool,
        seed: u64,
    ) -> Result<DatasetHandle, ProvisionError> {
        let name: DatasetName = name.parse()?;
        self.provision(name, test_mode, seed).await
    }

    async fn create_or_fetch(&self, key: &str) -> Result<DatasetHandle, ProvisionError> {
        tracing::info!(dataset = %key, "creating dataset");
        match self.store.create_dataset(key).await {
            Ok(handle) => Ok(handle),
            Err(e) if e.is_conflict() => {
                tracing::info!(dataset = %key, "dataset already exists, fetching it instead");
                match self.store.get_dataset(key).await {
                    Ok(Some(handle)) => Ok(handle),
                    Ok(None) => Err(ProvisionError::ConflictResolution {
                        key: key.to_string(),
                        reason: "dataset not found".into(),
                    }),
                    Err(e) => Err(ProvisionError::ConflictResolution {
                        key: key.to_string(),
                        reason: e.to_string(),
                    }),
                }
            }
            Err(source) => Err(ProvisionError::Create {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Re-read the dataset; an insert is not trusted until its items show up.
    async fn verify(&self, key: &str, handle: &DatasetHandle) -> Result<usize, ProvisionError> {
        let items = self
            .store
            .get_items(handle)
            .await
            .map_err(|e| ProvisionError::Verify {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if items.is_empty() {
            return Err(ProvisionError::Verify {
                key: key.to_string(),
                reason: format!("No items found in dataset {key} after insert"),
            });
        }
        Ok(items.len())
    }
}

/// Provision with clients built from the process environment.
pub async fn get_or_create_dataset(
    name: DatasetName,
    test_mode: bool,
    seed: u64,
) -> Result<DatasetHandle, ProvisionError> {
    Provisioner::from_settings(&Settings::from_env())?
        .provision(name, test_mode, seed)
        .await
}
