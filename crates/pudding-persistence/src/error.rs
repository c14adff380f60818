//! Errores de persistencia.
//! Mapea errores de I/O y de serde a variantes semánticas y luego a
//! `StoreError`, que es lo que ve el core.

use std::io;
use std::path::PathBuf;

use pudding_core::{IdentifierError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("sample not found: {0}")]
    NotFound(String),
    #[error("malformed sample {id}: {source}")]
    Parse {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize envelope: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error("blocking task failed: {0}")]
    Join(String),
}

impl PersistenceError {
    /// Error de I/O sobre `path`; `NotFound` se distingue del resto.
    pub fn io(path: impl Into<PathBuf>, id: impl ToString, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(id.to_string())
        } else {
            Self::Io { path: path.into(),
                       source }
        }
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(id) => StoreError::NotFound(id),
            PersistenceError::Parse { id, source } => StoreError::Parse { id,
                                                                          message: source.to_string() },
            PersistenceError::Identifier(e) => StoreError::InvalidIdentifier(e.to_string()),
            other => StoreError::Io(other.to_string()),
        }
    }
}
