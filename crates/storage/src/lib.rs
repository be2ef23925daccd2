#![warn(clippy::pedantic)]

pub mod file;
pub mod memory;
pub mod normalize;
pub mod repository;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{KEY_ACTIVE_VIEW, KEY_TEMPLATES, KEY_WORKOUTS, LocalRepository};

/// Synchronous string-keyed key-value store. `get` returns `None` for a key
/// that was never written; `set` may fail when the backing medium is full or
/// unavailable.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
