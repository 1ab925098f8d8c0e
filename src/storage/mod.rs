pub mod file_backend;
pub mod memory;

use crate::errors::Result;

/// Synchronous string key-value store the ledger persists into.
///
/// Mirrors the browser `localStorage` contract: values are opaque strings and
/// removing an absent key succeeds.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub use file_backend::FileStore;
pub use memory::MemoryStore;
