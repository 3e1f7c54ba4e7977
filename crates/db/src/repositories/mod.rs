use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod file;
pub mod memory;
pub mod user;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use user::UserRepository;

pub const USER_PROFILE_KEY: &str = "userProfile";
pub const USER_PREFERENCES_KEY: &str = "userPreferences";
pub const OUTFIT_HISTORY_KEY: &str = "outfitHistory";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error at `{path}`: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("storage document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("storage document at `{0}` is not a JSON object")]
    NotAnObject(PathBuf),
}

/// String-keyed JSON document store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
