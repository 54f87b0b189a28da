pub mod error;
pub mod loaders;
pub mod provisioner;

pub mod prelude {
    pub use benchset_core::prelude::*;
    pub use benchset_store::prelude::{DatasetHandle, DatasetStore, MemoryStore, OpikStore};

    pub use crate::error::{ProvisionError, SourceError};
    pub use crate::loaders::{Sources, load_raw};
    pub use crate::provisioner::{Lookup, MissReason, Provisioner, get_or_create_dataset};
}
