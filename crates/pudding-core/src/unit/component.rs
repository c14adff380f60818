use serde_json::Value;

use crate::errors::ProcessError;
use crate::schema::Schema;

/// Transformación de usuario envuelta por una `Unit`.
///
/// `process` se invoca sólo con una entrada ya validada y no debe hacer I/O:
/// la persistencia es responsabilidad de la unidad. Un error devuelto o un
/// panic dentro de `process` se reporta como `UnitError::Processing`.
pub trait Component: Send + Sync {
    type Input: Schema;
    type Output: Schema;

    /// Nombre de la unidad (también directorio de muestras). Debe cumplir las
    /// reglas de `UnitName`.
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn process(&self, input: Self::Input) -> Result<Self::Output, ProcessError>;

    /// Permite remodelar los datos crudos antes de validarlos (identidad por
    /// defecto).
    fn prepare_input(&self, raw: Value) -> Value {
        raw
    }

    /// Esquemas ajenos que `prepare_input` sabe adaptar a `Input`. Un envelope
    /// con uno de estos `schema_name` pasa la verificación de compatibilidad
    /// (ninguno por defecto).
    fn accepts_schema(&self, _schema_name: &str) -> bool {
        false
    }
}
