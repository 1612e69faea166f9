//! Local file storage for profile images.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Metadata for a stored file.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Storage key (relative path).
    pub key: String,
    /// Public path to access the file.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME content type.
    pub content_type: String,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a file under the given key, replacing any previous content.
    async fn store(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredFile>;

    /// Delete a file.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn store(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredFile> {
        let path = self.base_path.join(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write file: {e}")))?;

        Ok(StoredFile {
            key: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.base_path.join(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!("Failed to delete file: {e}"))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn public_url_joins_base_and_key() {
        let storage = LocalStorage::new(PathBuf::from("/tmp/files"), "/images/profiles/".into());
        assert_eq!(
            storage.public_url("user-7.png"),
            "/images/profiles/user-7.png"
        );
    }

    #[tokio::test]
    async fn store_and_delete_round_trip() {
        let dir = std::env::temp_dir().join(format!("reporter-storage-{}", std::process::id()));
        let storage = LocalStorage::new(dir.clone(), "/images/profiles".into());

        let stored = storage.store("user-1.png", b"png-bytes", "image/png").await.unwrap();
        assert_eq!(stored.size, 9);
        assert_eq!(stored.url, "/images/profiles/user-1.png");
        assert!(dir.join("user-1.png").exists());

        storage.delete("user-1.png").await.unwrap();
        assert!(!dir.join("user-1.png").exists());

        // Deleting again is a no-op
        storage.delete("user-1.png").await.unwrap();

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
