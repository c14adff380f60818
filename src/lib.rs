//! pudding
//!
//! Fachada del workspace:
//! - Re-exporta `pudding_core` (unidades, envelopes, registro),
//!   `pudding_persistence` (store en disco) y `pudding_adapters` (componentes
//!   de texto de demostración).
//! - `logging`: inicialización de logs para binarios.
//! - `batch`: ejecución paralela de entradas independientes.

pub mod batch;
pub mod errors;
pub mod logging;

pub use pudding_adapters;
pub use pudding_core;
pub use pudding_persistence;

pub use batch::run_batch;
pub use errors::DemoError;
