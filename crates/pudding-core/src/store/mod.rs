//! Sample Store: persistencia de envelopes de entrada/salida por unidad.
//!
//! Contrato común a todas las implementaciones:
//! - `save` nunca reescribe una muestra existente; colisiones dentro del mismo
//!   milisegundo reciben un contador (`_001`, `_002`, ...).
//! - `latest` se resuelve por orden de nombre de archivo (sello temporal), sin
//!   índice persistente: su costo es lineal en la cantidad de muestras de la
//!   unidad.
//! - `save`/`load` son bloqueantes. El core no ofrece batching ni interfaz
//!   asíncrona.
//!
//! `InMemorySampleStore` vive aquí; la implementación sobre disco está en
//! `pudding-persistence`.

mod ids;
mod memory;

use log::warn;
use serde_json::Value;

pub use ids::{Direction, SampleId, UnitName, MAX_COLLISION_COUNTER};
pub use memory::InMemorySampleStore;

use crate::errors::StoreError;
use crate::model::Envelope;

pub trait SampleStore: Send + Sync {
    /// Persiste `envelope` y devuelve su identificador. Sólo retorna `Ok`
    /// cuando la escritura está completa.
    fn save(&self, unit: &UnitName, direction: Direction, envelope: &Envelope<Value>) -> Result<SampleId, StoreError>;

    /// Carga una muestra concreta.
    fn load(&self, id: &SampleId) -> Result<Envelope<Value>, StoreError>;

    /// Ids de las muestras de `unit` (opcionalmente filtradas por dirección),
    /// en orden cronológico.
    fn list(&self, unit: &UnitName, direction: Option<Direction>) -> Result<Vec<SampleId>, StoreError>;

    /// Muestra más reciente de `unit` en `direction`, si existe.
    fn latest(&self, unit: &UnitName, direction: Direction) -> Result<Option<Envelope<Value>>, StoreError> {
        let ids = self.list(unit, Some(direction))?;
        match latest_id(&ids) {
            Some(id) => self.load(id).map(Some),
            None => Ok(None),
        }
    }

    /// Igual que `load` pero exige que la muestra tenga el esquema `schema`.
    fn load_expecting(&self, id: &SampleId, schema: &str) -> Result<Envelope<Value>, StoreError> {
        let env = self.load(id)?;
        if env.schema_name() != schema {
            return Err(StoreError::SchemaMismatch { expected: schema.to_string(),
                                                    found: env.schema_name().to_string() });
        }
        Ok(env)
    }
}

/// Selecciona el id más reciente (recorrido lineal).
///
/// Cuando varias muestras comparten el mismo milisegundo, el orden entre
/// ellas no está definido por el contrato; se usa el contador de colisión y
/// se emite un `warn!` para dejarlo visible.
pub fn latest_id(ids: &[SampleId]) -> Option<&SampleId> {
    let latest = ids.iter().max()?;
    let ties = ids.iter().filter(|id| id.stamp() == latest.stamp()).count();
    if ties > 1 {
        warn!("latest sample for {}/{} is ambiguous: {} samples share stamp {}; picked {}",
              latest.unit(),
              latest.direction(),
              ties,
              latest.stamp(),
              latest.file_name());
    }
    Some(latest)
}
