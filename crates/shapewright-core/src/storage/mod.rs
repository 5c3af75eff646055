//! Persistence of documents in the text format.
//!
//! Local backends implement [`Storage`]; the remote store is reached through a
//! [`RemoteSession`]. All calls block and never retry.

mod file;
mod memory;
mod remote;

pub use file::{DOCUMENT_EXTENSION, FileStorage};
pub use memory::MemoryStorage;
pub use remote::{ConnectionState, MemoryRemoteStore, RemoteSession, RemoteStore};

use crate::codec::CodecError;
use crate::document::Document;
use std::io;
use thiserror::Error;

/// Broad category of a persistence failure, for the UI to react on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistenceErrorKind {
    NotFound,
    AccessDenied,
    Unreachable,
    Malformed,
    Unknown,
}

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Store unreachable: {0}")]
    Unreachable(String),
    #[error("Malformed document: {0}")]
    Malformed(String),
    #[error("Storage error: {0}")]
    Unknown(String),
}

impl PersistenceError {
    pub fn kind(&self) -> PersistenceErrorKind {
        match self {
            PersistenceError::NotFound(_) => PersistenceErrorKind::NotFound,
            PersistenceError::AccessDenied(_) => PersistenceErrorKind::AccessDenied,
            PersistenceError::Unreachable(_) => PersistenceErrorKind::Unreachable,
            PersistenceError::Malformed(_) => PersistenceErrorKind::Malformed,
            PersistenceError::Unknown(_) => PersistenceErrorKind::Unknown,
        }
    }

    /// Human-readable detail without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            PersistenceError::NotFound(m)
            | PersistenceError::AccessDenied(m)
            | PersistenceError::Unreachable(m)
            | PersistenceError::Malformed(m)
            | PersistenceError::Unknown(m) => m,
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(err: io::Error) -> Self {
        let message = err.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => PersistenceError::NotFound(message),
            io::ErrorKind::PermissionDenied => PersistenceError::AccessDenied(message),
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable
            | io::ErrorKind::TimedOut => PersistenceError::Unreachable(message),
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                PersistenceError::Malformed(message)
            }
            _ => PersistenceError::Unknown(message),
        }
    }
}

impl From<CodecError> for PersistenceError {
    fn from(err: CodecError) -> Self {
        PersistenceError::Malformed(err.to_string())
    }
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Trait for local document storage backends.
pub trait Storage: Send + Sync {
    /// Save a document under `id`, replacing any previous version.
    fn save(&self, id: &str, document: &Document) -> PersistenceResult<()>;

    /// Load a document.
    fn load(&self, id: &str) -> PersistenceResult<Document>;

    /// Delete a document. Deleting a missing document is not an error.
    fn delete(&self, id: &str) -> PersistenceResult<()>;

    /// List all document IDs.
    fn list(&self) -> PersistenceResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> PersistenceResult<bool>;
}
