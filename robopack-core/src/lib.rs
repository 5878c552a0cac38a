#![forbid(unsafe_code)]

pub mod error;
pub mod index;
pub mod record;

pub mod pack {
    pub mod pairing;
    pub mod slice;
    pub mod transform;
    pub mod writer;
}

pub mod import;
pub mod train;

// Re-exports: stable API surface
pub use import::import_donkey_records;
pub use pack::writer::{ArchiveOptions, build_archive, write_archive};
pub use train::{HyperParameters, ModelType};
