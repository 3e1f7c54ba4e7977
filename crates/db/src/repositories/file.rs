//! Single-file JSON store. The whole document is one object keyed like the
//! browser storage the client app used.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;

use super::{KeyValueStore, StorageError};

pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(StorageError::Io { path: self.path.clone(), source }),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(document) => Ok(document),
            _ => Err(StorageError::NotAnObject(self.path.clone())),
        }
    }

    /// Writes to a sibling temp file and renames it over the document.
    async fn write_document(&self, document: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
        }

        let body = serde_json::to_vec_pretty(document)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body)
            .await
            .map_err(|source| StorageError::Io { path: staging.clone(), source })?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|source| StorageError::Io { path: self.path.clone(), source })
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let document = self.read_document().await?;
        Ok(document.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value);
        self.write_document(&document).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        if document.remove(key).is_none() {
            return Ok(());
        }
        self.write_document(&document).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use crate::repositories::{JsonFileStore, KeyValueStore, StorageError};

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get("userPreferences").await.expect("get"), None);
    }

    #[tokio::test]
    async fn values_survive_a_new_store_instance() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("store.json");

        let store = JsonFileStore::new(&path);
        store.set("userPreferences", json!({"selectedStyle": "smart"})).await.expect("set");
        store.set("userProfile", json!({"gender": "male", "age": 41})).await.expect("set");

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get("userPreferences").await.expect("get"),
            Some(json!({"selectedStyle": "smart"}))
        );

        reopened.remove("userPreferences").await.expect("remove");
        assert_eq!(store.get("userPreferences").await.expect("get"), None);
        assert!(store.get("userProfile").await.expect("get").is_some());
    }

    #[tokio::test]
    async fn corrupt_document_is_a_decode_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").expect("write corrupt file");

        let store = JsonFileStore::new(&path);
        let error = store.get("outfitHistory").await.expect_err("corrupt file");
        assert!(matches!(error, StorageError::Decode(_)));
    }

    #[tokio::test]
    async fn non_object_document_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2, 3]").expect("write array file");

        let store = JsonFileStore::new(&path);
        let error = store.set("userProfile", json!({})).await.expect_err("array document");
        assert!(matches!(error, StorageError::NotAnObject(_)));
    }
}
