//! Storage abstraction trait
//!
//! This module defines the Storage trait the photo pipelines write to and
//! read from. The local filesystem backend is the only implementation in
//! tree; an object-storage sink can be slotted in behind the same trait.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Target already exists: {0}")]
    AlreadyExists(String),

    #[error("Path escapes storage root: {0}")]
    PathViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte stream returned by [`Storage::read_stream`].
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage gateway trait
///
/// All backends must enforce the same containment invariant: no operation may
/// touch a path whose canonical form lies outside the backend's root, no
/// matter what the caller passed in. Writes use exclusive-create semantics so
/// an identifier collision fails loudly instead of silently overwriting.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist a buffer under the given identifier.
    ///
    /// Fails with `AlreadyExists` if the identifier is taken and
    /// `PathViolation` if the identifier does not resolve inside the root.
    /// No partial file remains on any failure branch.
    async fn write(&self, filename: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read a stored asset fully into memory.
    async fn read(&self, filename: &str) -> StorageResult<Vec<u8>>;

    /// Read a stored asset as a stream of chunks.
    async fn read_stream(&self, filename: &str) -> StorageResult<ByteStream>;

    /// Check whether an identifier is present.
    async fn exists(&self, filename: &str) -> StorageResult<bool>;
}
