use chrono::Utc;
use dashmap::DashMap;
use log::debug;
use serde_json::Value;

use super::{Direction, SampleId, SampleStore, UnitName};
use crate::errors::StoreError;
use crate::model::Envelope;

/// Store en memoria (tests y ejecuciones efímeras). Mismo contrato que el
/// store en disco, sin durabilidad.
#[derive(Debug, Default)]
pub struct InMemorySampleStore {
    samples: DashMap<UnitName, Vec<(SampleId, Envelope<Value>)>>,
}

impl InMemorySampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cantidad total de muestras guardadas.
    pub fn len(&self) -> usize {
        self.samples.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SampleStore for InMemorySampleStore {
    fn save(&self, unit: &UnitName, direction: Direction, envelope: &Envelope<Value>) -> Result<SampleId, StoreError> {
        let mut entry = self.samples.entry(unit.clone()).or_default();
        let mut id = SampleId::at(unit.clone(), direction, Utc::now(), 0)?;
        while entry.iter().any(|(existing, _)| existing == &id) {
            id = id.next_collision()?;
        }
        entry.push((id.clone(), envelope.clone()));
        debug!("in-memory sample saved: {id}");
        Ok(id)
    }

    fn load(&self, id: &SampleId) -> Result<Envelope<Value>, StoreError> {
        self.samples
            .get(id.unit())
            .and_then(|entry| entry.iter().find(|(existing, _)| existing == id).map(|(_, env)| env.clone()))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list(&self, unit: &UnitName, direction: Option<Direction>) -> Result<Vec<SampleId>, StoreError> {
        let mut ids: Vec<SampleId> = match self.samples.get(unit) {
            Some(entry) => entry.iter()
                                .map(|(id, _)| id)
                                .filter(|id| direction.map_or(true, |d| id.direction() == d))
                                .cloned()
                                .collect(),
            None => Vec::new(),
        };
        ids.sort();
        Ok(ids)
    }
}
