//! Resultado de una ejecución de unidad.
//!
//! Invariante: un `Outcome` exitoso lleva un envelope de salida y ningún
//! error; uno fallido lleva un error y ningún envelope. Se garantiza por
//! construcción guardando internamente un `Result`.
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Envelope, Producer};
use crate::errors::UnitError;
use crate::schema::Schema;
use crate::store::SampleId;
use crate::unit::RunState;

/// Forma de la entrada que resolvió la ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Replay,
    Sample,
    Outcome,
    Unit,
    Raw,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replay => "replay",
            Self::Sample => "sample",
            Self::Outcome => "outcome",
            Self::Unit => "unit",
            Self::Raw => "raw",
        }
    }
}

/// Metadatos de una ejecución, presentes tanto en éxito como en fallo.
#[derive(Debug, Clone)]
pub struct RunMetadata {
    pub unit: Producer,
    pub execution_id: String,
    pub source_kind: SourceKind,
    pub is_replay: bool,
    pub started_at: DateTime<Utc>,
    /// Estados visitados, en orden (siempre empieza en `Idle`).
    pub states: Vec<RunState>,
    /// Estado en el que se produjo el fallo, si lo hubo.
    pub failed_at: Option<RunState>,
    /// Envelope de entrada ya resuelto (None si la resolución falló).
    pub input: Option<Envelope<Value>>,
    /// Muestras persistidas durante la ejecución.
    pub saved: Vec<SampleId>,
}

#[derive(Debug, Clone)]
pub struct Outcome<T> {
    result: Result<Envelope<T>, UnitError>,
    duration: Duration,
    metadata: RunMetadata,
}

impl<T> Outcome<T> {
    pub(crate) fn success(output: Envelope<T>, duration: Duration, metadata: RunMetadata) -> Self {
        Self { result: Ok(output),
               duration,
               metadata }
    }

    pub(crate) fn failure(error: UnitError, duration: Duration, metadata: RunMetadata) -> Self {
        Self { result: Err(error),
               duration,
               metadata }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn output(&self) -> Option<&Envelope<T>> {
        self.result.as_ref().ok()
    }

    pub fn payload(&self) -> Option<&T> {
        self.output().map(Envelope::payload)
    }

    pub fn error(&self) -> Option<&UnitError> {
        self.result.as_ref().err()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    /// Envelope de entrada resuelto para esta ejecución.
    pub fn input(&self) -> Option<&Envelope<Value>> {
        self.metadata.input.as_ref()
    }

    pub fn into_result(self) -> Result<Envelope<T>, UnitError> {
        self.result
    }
}

impl<T: Serialize> Outcome<T> {
    /// Variante con payload JSON genérico (encadenamiento sin tipos).
    pub fn erased(&self) -> Outcome<Value> {
        let result = match &self.result {
            Ok(env) => env.erase().map_err(|e| UnitError::Processing { unit: self.metadata.unit.name.clone(),
                                                                      message: format!("output not serializable: {e}") }),
            Err(e) => Err(e.clone()),
        };
        Outcome { result,
                  duration: self.duration,
                  metadata: self.metadata.clone() }
    }
}

impl Outcome<Value> {
    /// Re-tipa la salida al esquema `S`.
    pub fn decode<S: Schema>(self) -> Outcome<S> {
        let unit = self.metadata.unit.name.clone();
        let result = self.result.and_then(|env| {
                                    env.decode::<S>().map_err(|e| UnitError::Processing { unit,
                                                                                          message: format!("output does not decode as {}: {e}", S::NAME) })
                                });
        Outcome { result,
                  duration: self.duration,
                  metadata: self.metadata }
    }
}
