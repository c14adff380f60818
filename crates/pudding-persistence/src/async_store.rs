//! Frontera asíncrona del Sample Store.
//!
//! El core es síncrono; este adaptador permite usar cualquier `SampleStore`
//! desde código `tokio` sin bloquear el runtime: cada operación corre en
//! `spawn_blocking` sobre un `Arc` compartido.
use std::sync::Arc;

use async_trait::async_trait;
use pudding_core::{Direction, Envelope, SampleId, SampleStore, StoreError, UnitName};
use serde_json::Value;
use tokio::task::{spawn_blocking, JoinError};

use crate::error::PersistenceError;

#[async_trait]
pub trait AsyncSampleStore: Send + Sync {
    async fn save(&self, unit: &UnitName, direction: Direction, envelope: &Envelope<Value>) -> Result<SampleId, StoreError>;

    async fn load(&self, id: &SampleId) -> Result<Envelope<Value>, StoreError>;

    async fn latest(&self, unit: &UnitName, direction: Direction) -> Result<Option<Envelope<Value>>, StoreError>;

    async fn list(&self, unit: &UnitName, direction: Option<Direction>) -> Result<Vec<SampleId>, StoreError>;
}

/// Ejecuta un `SampleStore` bloqueante fuera del runtime.
#[derive(Debug)]
pub struct Offloaded<S> {
    inner: Arc<S>,
}

impl<S> Clone for Offloaded<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: SampleStore + 'static> Offloaded<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self { inner }
    }

    /// Store síncrono subyacente (p. ej. para construir `Unit`s).
    pub fn inner(&self) -> &Arc<S> {
        &self.inner
    }
}

fn join_error(err: JoinError) -> StoreError {
    PersistenceError::Join(err.to_string()).into()
}

#[async_trait]
impl<S: SampleStore + 'static> AsyncSampleStore for Offloaded<S> {
    async fn save(&self, unit: &UnitName, direction: Direction, envelope: &Envelope<Value>) -> Result<SampleId, StoreError> {
        let store = Arc::clone(&self.inner);
        let unit = unit.clone();
        let envelope = envelope.clone();
        spawn_blocking(move || store.save(&unit, direction, &envelope)).await
                                                                       .map_err(join_error)?
    }

    async fn load(&self, id: &SampleId) -> Result<Envelope<Value>, StoreError> {
        let store = Arc::clone(&self.inner);
        let id = id.clone();
        spawn_blocking(move || store.load(&id)).await.map_err(join_error)?
    }

    async fn latest(&self, unit: &UnitName, direction: Direction) -> Result<Option<Envelope<Value>>, StoreError> {
        let store = Arc::clone(&self.inner);
        let unit = unit.clone();
        spawn_blocking(move || store.latest(&unit, direction)).await.map_err(join_error)?
    }

    async fn list(&self, unit: &UnitName, direction: Option<Direction>) -> Result<Vec<SampleId>, StoreError> {
        let store = Arc::clone(&self.inner);
        let unit = unit.clone();
        spawn_blocking(move || store.list(&unit, direction)).await.map_err(join_error)?
    }
}
