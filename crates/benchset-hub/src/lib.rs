pub mod assets;
pub mod error;
pub mod hf;
pub mod hub;
pub mod memory;
pub mod retry;
pub mod tabular;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assets::{AssetBundle, DirAssets, StaticAssets};
    pub use crate::error::HubError;
    pub use crate::hf::HfHub;
    pub use crate::hub::{DatasetHub, HubSplit, RowPage, fetch_all_rows, select_rows, take_rows};
    pub use crate::memory::StaticHub;
    pub use crate::retry::with_retry;
    pub use crate::tabular::{TabularFetch, decode_parquet, sample_rows};
}
