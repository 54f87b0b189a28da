use thiserror::Error;

use benchset_core::catalog::{DatasetName, UnknownDataset};
use benchset_core::record::MissingField;
use benchset_hub::error::HubError;
use benchset_store::error::StoreError;

/// A loader could not produce usable records.
///
/// Every variant means the source is unavailable for this call and carries
/// the dataset it was loading.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unable to download {dataset}: {source}")]
    Unavailable {
        dataset: DatasetName,
        source: HubError,
    },

    #[error("Unexpected row shape in {dataset}: {source}")]
    Malformed {
        dataset: DatasetName,
        source: MissingField,
    },

    #[error("No valid examples found in {dataset}")]
    Empty { dataset: DatasetName },
}

impl SourceError {
    pub fn dataset(&self) -> DatasetName {
        match self {
            Self::Unavailable { dataset, .. }
            | Self::Malformed { dataset, .. }
            | Self::Empty { dataset } => *dataset,
        }
    }
}

/// Terminal failure of a provisioning call.
///
/// Nothing here is retried internally; callers decide whether to try again.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("Failed to initialize client: {0}")]
    ClientInit(String),

    #[error("Critical error loading data for {dataset} from source: {source}")]
    Source {
        dataset: DatasetName,
        source: SourceError,
    },

    #[error("No data loaded for dataset source: {0}")]
    NoData(DatasetName),

    #[error("API error creating dataset {key}: {source}")]
    Create { key: String, source: StoreError },

    #[error("Conflict creating {key}, but failed to retrieve the existing dataset afterwards: {reason}")]
    ConflictResolution { key: String, reason: String },

    #[error("Failed to insert data into dataset {key}: {source}")]
    Insert { key: String, source: StoreError },

    #[error("Failed to verify items in dataset {key} after insert: {reason}")]
    Verify { key: String, reason: String },
}

impl From<SourceError> for ProvisionError {
    fn from(e: SourceError) -> Self {
        Self::Source {
            dataset: e.dataset(),
            source: e,
        }
    }
}

impl From<UnknownDataset> for ProvisionError {
    fn from(e: UnknownDataset) -> Self {
        Self::UnknownDataset(e.0)
    }
}

/// Render an error and its sources as one line: `outer: inner: root`.
pub fn cause_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        current = cause.source();
    }
    out
}
