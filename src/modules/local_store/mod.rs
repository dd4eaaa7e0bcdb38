//! File-persisted key/value store used when the database is unavailable.
//!
//! Each key maps to `<dir>/<key>.json` holding one serialized list.

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("Local store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Local store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct LocalStore {
    dir: PathBuf,
    /// Serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load the list stored under `key`. Missing or unreadable data loads as empty.
    pub async fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_list(key).await
    }

    /// Replace the list stored under `key`
    pub async fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), LocalStoreError> {
        let _guard = self.lock.lock().await;
        self.write_list(key, items).await
    }

    /// Load, modify and save a list while holding the store lock.
    ///
    /// The closure's return value is handed back once the list is saved.
    pub async fn update_list<T, R, F>(&self, key: &str, f: F) -> Result<R, LocalStoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.lock.lock().await;
        let mut items: Vec<T> = self.try_read_list(key).await?;
        let result = f(&mut items);
        self.write_list(key, &items).await?;
        Ok(result)
    }

    async fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.try_read_list(key).await.unwrap_or_else(|e| {
            tracing::error!(
                "Unreadable local store {}, treating as empty: {}",
                self.path_for(key).display(),
                e
            );
            Vec::new()
        })
    }

    /// Strict read for updates; a corrupt file must never be overwritten
    async fn try_read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, LocalStoreError> {
        let raw = match tokio::fs::read(self.path_for(key)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), LocalStoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(self.path_for(key), json).await?;
        Ok(())
    }
}
