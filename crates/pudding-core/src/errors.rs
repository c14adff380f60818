//! Errores del core.
//!
//! Todas las variantes que viajan dentro de un `Outcome` son `Clone` +
//! `Serialize`, de modo que un fallo puede inspeccionarse, compararse en tests
//! y proyectarse a JSON igual que un resultado exitoso. El core no reintenta
//! nada automáticamente: cada error se devuelve tal cual al caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FieldErrors;

/// Clasificación estable de errores (útil para logs y asserts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Processing,
    NotFound,
    Parse,
    SchemaMismatch,
    DuplicateName,
    IncompatibleSchema,
    NotRegistered,
    Io,
    InvalidIdentifier,
    Upstream,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Processing => "processing",
            Self::NotFound => "not_found",
            Self::Parse => "parse",
            Self::SchemaMismatch => "schema_mismatch",
            Self::DuplicateName => "duplicate_name",
            Self::IncompatibleSchema => "incompatible_schema",
            Self::NotRegistered => "not_registered",
            Self::Io => "io",
            Self::InvalidIdentifier => "invalid_identifier",
            Self::Upstream => "upstream",
        }
    }
}

/// Errores del Sample Store (save / load / latest).
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreError {
    #[error("sample not found: {0}")]
    NotFound(String),
    #[error("malformed sample {id}: {message}")]
    Parse { id: String, message: String },
    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Errores del registro de componentes.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryError {
    #[error("component '{0}' is already registered")]
    DuplicateName(String),
    #[error("schema mismatch: {producer} outputs {output_schema}, {consumer} expects {input_schema}")]
    IncompatibleSchema {
        producer: String,
        output_schema: String,
        consumer: String,
        input_schema: String,
    },
    #[error("component '{0}' not registered")]
    NotRegistered(String),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateName(_) => ErrorKind::DuplicateName,
            Self::IncompatibleSchema { .. } => ErrorKind::IncompatibleSchema,
            Self::NotRegistered(_) => ErrorKind::NotRegistered,
        }
    }
}

/// Error reportado dentro de un `Outcome` fallido.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitError {
    #[error("validation failed for {schema}: {fields}")]
    Validation { schema: String, fields: FieldErrors },
    #[error("component {unit} failed: {message}")]
    Processing { unit: String, message: String },
    #[error("component {unit} cannot process this data: expects {expected}, got {found}")]
    SchemaMismatch { unit: String, expected: String, found: String },
    #[error("upstream component {unit} produced no output: {message}")]
    UpstreamFailed { unit: String, message: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UnitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Processing { .. } => ErrorKind::Processing,
            Self::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            Self::UpstreamFailed { .. } => ErrorKind::Upstream,
            Self::Store(e) => e.kind(),
        }
    }

    /// Detalle por campo cuando el fallo es de validación.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

/// Error devuelto por `Component::process`. El runner lo convierte en
/// `UnitError::Processing`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ProcessError(pub String);

impl ProcessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for ProcessError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for ProcessError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl From<serde_json::Error> for ProcessError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// Error en la construcción de identificadores (nombres de unidad, ids de
/// muestra). Es un error del programador, no del camino de datos.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid identifier '{value}': {reason}")]
pub struct IdentifierError {
    pub value: String,
    pub reason: &'static str,
}

impl From<IdentifierError> for StoreError {
    fn from(err: IdentifierError) -> Self {
        StoreError::InvalidIdentifier(err.to_string())
    }
}
