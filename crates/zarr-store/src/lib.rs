//! A minimal key/value storage capability for Zarr hierarchies and its file-backed
//! implementation.
//!
//! Keys are `/`-delimited identifiers relative to a store's root prefix. The only backend is
//! [`FileStore`], which maps every key to a file below the prefix and is read-only unless it was
//! explicitly created with [`PersistenceMode::ReadWrite`].

pub mod array_metadata;
pub mod config;
pub mod error;
pub mod file_store;
pub mod path;
pub mod persistence_mode;
pub mod store;

pub use array_metadata::ArrayMetadata;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file_store::FileStore;
pub use path::join_url_parts;
pub use persistence_mode::PersistenceMode;
pub use store::Store;
