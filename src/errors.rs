//! Errores del binario de demo.

use pudding_core::{IdentifierError, RegistryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid unit: {0}")]
    Unit(#[from] IdentifierError),
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_registry_errors() {
        let err: DemoError = RegistryError::NotRegistered("ghost".into()).into();
        assert_eq!(err.to_string(), "registry: component 'ghost' not registered");
    }
}
