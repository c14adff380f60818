use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::InputSource;
use crate::config::RunConfig;
use crate::errors::StoreError;
use crate::model::{Envelope, Outcome};

/// Identidad pública de una unidad: nombre, versión y esquemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    pub version: String,
    pub input_schema: String,
    pub output_schema: String,
}

/// Vista sin tipos de una unidad (object-safe). La usan el registro, las
/// fuentes `InputSource::Unit` y el encadenamiento.
pub trait ComponentHandle: Send + Sync {
    fn descriptor(&self) -> Descriptor;

    /// Última salida persistida de la unidad, si existe.
    fn latest_output(&self) -> Result<Option<Envelope<Value>>, StoreError>;

    fn run_erased(&self, source: InputSource<'_>, config: &RunConfig) -> Outcome<Value>;
}
