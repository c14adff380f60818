//! Capacidad de esquema: identidad + conjunto de campos declarado.
//!
//! Un `Schema` es un tipo de datos concreto (serde) que además declara:
//! - `NAME`: identidad del esquema. Dos unidades sólo se encadenan si la
//!   salida de una y la entrada de la otra comparten exactamente este nombre
//!   (identidad, no subtipado estructural).
//! - `fields()`: el conjunto de campos esperado, usado por el validador para
//!   enumerar campos faltantes, sobrantes o con tipo incorrecto.
//!
//! La forma habitual de declarar un esquema es el macro `typed_schema!`.

mod field;
pub mod macros;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub use field::{FieldKind, FieldSpec, FieldType};

/// Especificación abstracta de un payload tipado.
pub trait Schema: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Identidad del esquema (se persiste como `schema_name`).
    const NAME: &'static str;

    /// Campos declarados, en orden de declaración.
    fn fields() -> Vec<FieldSpec>;

    /// Validación semántica ligera (sin efectos secundarios). Opcional.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }

    /// Proyección JSON del valor.
    fn to_payload(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
