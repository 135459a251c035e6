use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    canonical_root: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `root`.
    ///
    /// Creates the directory if it does not exist (idempotent), then resolves
    /// it to its canonical form for the containment checks below. Called once
    /// during service bootstrap.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                root.display(),
                e
            ))
        })?;

        let canonical_root = fs::canonicalize(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to canonicalize storage directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalStorage { canonical_root })
    }

    /// Resolve an identifier to a filesystem path, enforcing containment.
    ///
    /// Callers have already validated the identifier format, but this check
    /// is the last line of defense and must never be skipped: it rejects
    /// anything that is not a bare filename, then verifies the resolved path
    /// stays under the canonical root (following symlinks when the target
    /// exists).
    fn resolve(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty()
            || filename.contains('\0')
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::PathViolation(filename.to_string()));
        }

        let path = self.canonical_root.join(filename);

        // A bare filename joined onto the root cannot point elsewhere, but a
        // symlink planted in the storage directory could. Canonicalize when
        // the target exists and re-check containment.
        if let Ok(canonical) = path.canonicalize() {
            if !canonical.starts_with(&self.canonical_root) {
                return Err(StorageError::PathViolation(filename.to_string()));
            }
        } else if path.parent() != Some(self.canonical_root.as_path()) {
            return Err(StorageError::PathViolation(filename.to_string()));
        }

        Ok(path)
    }

    /// Remove a file left behind by a failed write. Errors are logged, not
    /// propagated; the original write error is what the caller needs.
    async fn cleanup_partial(path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove partial file after write error"
            );
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn write(&self, filename: &str, data: Vec<u8>) -> StorageResult<()> {
        let path = self.resolve(filename)?;
        let size = data.len();
        let start = std::time::Instant::now();

        // Exclusive create: an identifier collision fails loudly instead of
        // overwriting an existing asset.
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(filename.to_string()));
            }
            Err(e) => {
                return Err(StorageError::WriteFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        if let Err(e) = file.write_all(&data).await {
            drop(file);
            Self::cleanup_partial(&path).await;
            return Err(StorageError::WriteFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        if let Err(e) = file.sync_all().await {
            drop(file);
            Self::cleanup_partial(&path).await;
            return Err(StorageError::WriteFailed(format!(
                "Failed to sync file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            filename = %filename,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(())
    }

    async fn read(&self, filename: &str) -> StorageResult<Vec<u8>> {
        let path = self.resolve(filename)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(data)
    }

    async fn read_stream(&self, filename: &str) -> StorageResult<ByteStream> {
        let path = self.resolve(filename)?;
        let start = std::time::Instant::now();

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(filename.to_string()));
            }
            Err(e) => {
                return Err(StorageError::ReadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let reader = tokio_util::io::ReaderStream::new(file);

        let name = filename.to_string();
        let path_display = path.display().to_string();
        let stream = reader.map(move |result| {
            result.map_err(|e| {
                tracing::error!(
                    path = %path_display,
                    filename = %name,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    error = %e,
                    "Local storage stream read error"
                );
                StorageError::ReadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    async fn exists(&self, filename: &str) -> StorageResult<bool> {
        let path = self.resolve(filename)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }
}
