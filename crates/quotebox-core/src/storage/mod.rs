//! Storage layer
//!
//! A small key-value capability modeled on browser storage: string keys,
//! string values, synchronous access.
//!
//! ## Implementations
//!
//! - **FileStorage**: one file per key in a directory, atomic writes
//! - **MemoryStorage**: shared in-memory map with an optional quota
//!
//! Durable storage (the quote collection) and session storage (the last
//! viewed index) are both just instances of this trait.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Synchronous string key-value storage
pub trait KeyValueStorage: Send {
    /// Read a value, `None` when the key was never set
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store a value, replacing any previous one
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

}
