pub mod repositories;

pub use repositories::{
    InMemoryStore, JsonFileStore, KeyValueStore, StorageError, UserRepository,
};
