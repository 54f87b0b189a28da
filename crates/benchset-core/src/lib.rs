pub mod catalog;
pub mod config;
pub mod record;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::{DEFAULT_SEED, DatasetName, UnknownDataset};
    pub use crate::config::Settings;
    pub use crate::record::{DatasetRecord, RecordExt};
}
