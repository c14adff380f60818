//! Unidad de ejecución.
//!
//! Flujo de `Unit::run`:
//! `Idle -> ResolvingInput -> Validating -> Processing -> WrappingOutput
//! -> (Persisting) -> Done`, con `Failed` como estado absorbente.
//!
//! Efectos en orden: guardar la entrada (si `save_input`), invocar la
//! transformación, envolver la salida con un registro de linaje nuevo, guardar
//! la salida (si `save_output`) y devolver el `Outcome`.

mod chain;
mod component;
mod handle;
mod runner;
mod source;
mod state;

pub use chain::{Chain, SameAs};
pub use component::Component;
pub use handle::{ComponentHandle, Descriptor};
pub use runner::Unit;
pub use source::InputSource;
pub use state::RunState;
