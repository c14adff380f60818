use serde::Serialize;
use serde_json::Value;

use super::ComponentHandle;
use crate::model::{Outcome, SourceKind};
use crate::schema::Schema;
use crate::store::SampleId;

/// Origen de la entrada de una ejecución.
///
/// Las cinco formas se resuelven con un `match` exhaustivo en este orden:
/// replay, muestra concreta, outcome previo, otra unidad y datos crudos.
pub enum InputSource<'a> {
    /// Última entrada persistida de esta misma unidad.
    Replay,
    /// Una muestra persistida concreta.
    Sample(SampleId),
    /// Salida de un outcome previo (encadenamiento).
    Outcome(Outcome<Value>),
    /// Última salida persistida de otra unidad.
    Unit(&'a dyn ComponentHandle),
    /// Datos crudos, se validan contra el esquema de entrada.
    Raw(Value),
}

impl InputSource<'_> {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Replay => SourceKind::Replay,
            Self::Sample(_) => SourceKind::Sample,
            Self::Outcome(_) => SourceKind::Outcome,
            Self::Unit(_) => SourceKind::Unit,
            Self::Raw(_) => SourceKind::Raw,
        }
    }

    /// Datos crudos a partir de un valor tipado.
    pub fn from_schema<S: Schema>(value: &S) -> Result<Self, serde_json::Error> {
        Ok(Self::Raw(value.to_payload()?))
    }
}

impl From<Value> for InputSource<'_> {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<SampleId> for InputSource<'_> {
    fn from(id: SampleId) -> Self {
        Self::Sample(id)
    }
}

impl<T: Serialize> From<&Outcome<T>> for InputSource<'_> {
    fn from(outcome: &Outcome<T>) -> Self {
        Self::Outcome(outcome.erased())
    }
}

impl<'a> From<&'a dyn ComponentHandle> for InputSource<'a> {
    fn from(handle: &'a dyn ComponentHandle) -> Self {
        Self::Unit(handle)
    }
}

impl std::fmt::Debug for InputSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replay => f.write_str("Replay"),
            Self::Sample(id) => f.debug_tuple("Sample").field(&id.to_string()).finish(),
            Self::Outcome(o) => f.debug_tuple("Outcome").field(&o.metadata().unit.name).finish(),
            Self::Unit(h) => f.debug_tuple("Unit").field(&h.descriptor().name).finish(),
            Self::Raw(v) => f.debug_tuple("Raw").field(v).finish(),
        }
    }
}
