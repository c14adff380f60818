//! pudding-persistence: Sample Store sobre sistema de archivos.
//!
//! - `FsSampleStore`: implementación durable de `pudding_core::SampleStore`
//!   (`<root>/<unit>/<direction>_<stamp>[_NNN].json`).
//! - `StoreConfig`: raíz del store desde entorno / `.env`.
//! - `Offloaded`: adaptador asíncrono que ejecuta las operaciones bloqueantes
//!   en `spawn_blocking`.

pub mod async_store;
pub mod config;
pub mod error;
pub mod fs;

pub use async_store::{AsyncSampleStore, Offloaded};
pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use fs::FsSampleStore;
