//! pudding-core: ejecución de componentes con validación de esquemas,
//! linaje de datos y replay desde muestras persistidas.
pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod registry;
pub mod schema;
pub mod store;
pub mod unit;
pub mod validation;

pub use config::{RunConfig, RunMode};
pub use errors::{ErrorKind, IdentifierError, ProcessError, RegistryError, StoreError, UnitError};
pub use model::{Envelope, LineageRecord, Outcome, Producer, RunMetadata, SourceKind};
pub use registry::{Registration, Registry};
pub use schema::{FieldKind, FieldSpec, FieldType, Schema};
pub use store::{Direction, InMemorySampleStore, SampleId, SampleStore, UnitName};
pub use unit::{Chain, Component, ComponentHandle, Descriptor, InputSource, RunState, SameAs, Unit};
pub use validation::{ExtraFields, FieldErrors, FieldMismatch, StructuralValidator, Validator};
