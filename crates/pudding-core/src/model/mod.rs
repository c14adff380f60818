//! Modelos de valor: `Envelope` (payload + procedencia) y `Outcome`
//! (resultado de una ejecución).

pub mod envelope;
pub mod outcome;

pub use envelope::{Envelope, LineageRecord, Producer};
pub use outcome::{Outcome, RunMetadata, SourceKind};
