use async_trait::async_trait;
use gijiroku_core::StorageError;
use std::path::Path;

/// The storage namespace both pipeline stages read from and write to.
///
/// Keys are plain decoded strings; any transport-level encoding is undone
/// before a key reaches the store. Writes to the same key overwrite, which
/// is what makes redelivered events safe.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the store's backend name (e.g. `"fs"`).
    fn name(&self) -> &str;

    /// Fetch the full content of an object.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write an object, overwriting any existing one at the same key.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Copy an object to a local path, returning the number of bytes written.
    async fn download_to(&self, bucket: &str, key: &str, dest: &Path)
        -> Result<u64, StorageError>;

    /// A URI a human can use to locate the object.
    fn uri(&self, bucket: &str, key: &str) -> String;
}
