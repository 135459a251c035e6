//! Bcslens Storage Library
//!
//! This crate provides the storage gateway for persisted photos: the
//! [`Storage`] trait and the local-filesystem implementation.
//!
//! # Layout
//!
//! Assets live in a single flat directory under the configured root, named
//! `{32 hex chars}.{extension}`. The identifier is the sole index; there are
//! no subdirectories and no sidecar metadata files.
//!
//! Every operation re-validates its target: identifiers must be bare
//! filenames, and the resolved path must stay inside the canonical root. The
//! check runs in the gateway itself so it cannot be skipped by a trusting
//! caller.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
