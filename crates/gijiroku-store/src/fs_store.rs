use crate::store_trait::ObjectStore;
use async_trait::async_trait;
use gijiroku_core::StorageError;
use std::path::{Path, PathBuf};

/// Filesystem-backed object store: a bucket is a directory under `root`,
/// keys map to relative paths inside it.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    fn name(&self) -> &str {
        "fs"
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(bucket, key);
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::ObjectNotFound(format!("{bucket}/{key}"))
            } else {
                StorageError::ReadFailed(e.to_string())
            }
        })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let path = self.object_path(bucket, key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        tracing::debug!(bucket, key, bytes = body.len(), "object written");
        Ok(())
    }

    async fn download_to(
        &self,
        bucket: &str,
        key: &str,
        dest: &Path,
    ) -> Result<u64, StorageError> {
        let path = self.object_path(bucket, key);
        tokio::fs::copy(&path, dest).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::ObjectNotFound(format!("{bucket}/{key}"))
            } else {
                StorageError::ReadFailed(e.to_string())
            }
        })
    }

    fn uri(&self, bucket: &str, key: &str) -> String {
        format!("file://{}", self.object_path(bucket, key).display())
    }
}
