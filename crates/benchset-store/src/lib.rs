pub mod error;
pub mod memory;
pub mod opik;
pub mod store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StoreError;
    pub use crate::memory::MemoryStore;
    pub use crate::opik::OpikStore;
    pub use crate::store::{DatasetHandle, DatasetStore};
}
