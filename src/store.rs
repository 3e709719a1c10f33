//! JSON document store backing the songs and playlists routers.
//!
//! Each collection is a single JSON file in the data directory mapping an
//! opaque string id to a document. Files are read and written whole per
//! operation; a mutex serializes the read-modify-write cycles of concurrent
//! requests. There are no transactions.

use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::sync::Mutex;

pub const SONGS: &str = "songs";
pub const PLAYLISTS: &str = "playlists";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub struct DocumentStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            lock: Mutex::new(()),
        }
    }

    /// Inserts a document under the given id, overwriting any previous
    /// document with the same id.
    pub async fn insert<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), StoreError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.lock.lock().await;
        let mut docs = self.read_collection::<T>(collection).await?;
        docs.insert(id.to_string(), doc.clone());
        self.write_collection(collection, &docs).await
    }

    pub async fn find_one<T>(&self, collection: &str, id: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let _guard = self.lock.lock().await;
        let mut docs = self.read_collection::<T>(collection).await?;
        Ok(docs.remove(id))
    }

    /// Returns up to `limit` documents, ordered by id.
    pub async fn find_all<T>(&self, collection: &str, limit: usize) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let _guard = self.lock.lock().await;
        let docs = self.read_collection::<T>(collection).await?;
        Ok(docs.into_values().take(limit).collect())
    }

    /// Replaces the document stored under the given id. Returns `false`
    /// without writing when no such document exists.
    pub async fn update_one<T>(&self, collection: &str, id: &str, doc: &T) -> Result<bool, StoreError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.lock.lock().await;
        let mut docs = self.read_collection::<T>(collection).await?;
        if !docs.contains_key(id) {
            return Ok(false);
        }
        docs.insert(id.to_string(), doc.clone());
        self.write_collection(collection, &docs).await?;
        Ok(true)
    }

    /// Removes the document stored under the given id. Returns `false` when
    /// no such document exists.
    pub async fn delete_one(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut docs = self
            .read_collection::<serde_json::Value>(collection)
            .await?;
        if docs.remove(id).is_none() {
            return Ok(false);
        }
        self.write_collection(collection, &docs).await?;
        Ok(true)
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }

    async fn read_collection<T>(&self, collection: &str) -> Result<BTreeMap<String, T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = self.collection_path(collection);
        match async_fs::read_to_string(&path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            // A collection that was never written to is empty, not an error.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write_collection<T>(
        &self,
        collection: &str,
        docs: &BTreeMap<String, T>,
    ) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let path = self.collection_path(collection);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(docs)?;
        async_fs::write(path, json).await?;
        Ok(())
    }
}
