//! Envelope: valor inmutable que envuelve un payload con identidad de esquema
//! y procedencia.
//!
//! Reglas:
//! - Un envelope nunca se modifica en sitio. Cada etapa crea uno nuevo que
//!   copia el linaje previo y añade exactamente un registro (`wrap`).
//! - El orden del linaje es el orden de procesamiento y sus timestamps no
//!   decrecen: si el reloj retrocede, el nuevo registro se fija al timestamp
//!   del anterior.
//! - La igualdad (`PartialEq`) compara sólo payload + `schema_name`.
//!
//! La forma serializada es exactamente la de un archivo de muestra
//! persistido (`component`, `version`, `timestamp`, ...).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::hashing::hash_value;
use crate::schema::Schema;

/// Componente que produjo un envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Producer {
    #[serde(rename = "component")]
    pub name: String,
    pub version: String,
}

impl Producer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { name: name.into(),
               version: version.into() }
    }
}

impl std::fmt::Display for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// Un paso del linaje.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageRecord {
    pub name: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    payload: T,
    schema_name: String,
    #[serde(flatten)]
    producer: Producer,
    #[serde(default)]
    lineage: Vec<LineageRecord>,
    execution_id: Option<String>,
    #[serde(rename = "timestamp")]
    created_at: DateTime<Utc>,
}

impl<T> Envelope<T> {
    /// Envelope sin linaje (datos que aún no pasaron por ninguna etapa).
    pub fn new(payload: T, schema_name: impl Into<String>, producer: Producer, execution_id: Option<String>) -> Self {
        Self { payload,
               schema_name: schema_name.into(),
               producer,
               lineage: Vec::new(),
               execution_id,
               created_at: Utc::now() }
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    pub fn lineage(&self) -> &[LineageRecord] {
        &self.lineage
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn execution_id(&self) -> Option<&str> {
        self.execution_id.as_deref()
    }

    /// Crea el envelope de la siguiente etapa: mismo linaje + un registro
    /// para `producer`.
    pub fn wrap<U>(&self,
                   payload: U,
                   schema_name: impl Into<String>,
                   producer: Producer,
                   execution_id: Option<String>)
                   -> Envelope<U> {
        let floor = self.lineage.last().map(|r| r.timestamp);
        let now = Utc::now();
        let timestamp = match floor {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        let mut lineage = self.lineage.clone();
        lineage.push(LineageRecord { name: producer.name.clone(),
                                     version: producer.version.clone(),
                                     timestamp,
                                     execution_id: execution_id.clone() });
        Envelope { payload,
                   schema_name: schema_name.into(),
                   producer,
                   lineage,
                   execution_id,
                   created_at: timestamp }
    }

    /// Copia con otro payload/esquema conservando procedencia y linaje. No
    /// agrega registros: sirve para re-etiquetar la entrada ya validada.
    pub(crate) fn restamped<U>(&self, payload: U, schema_name: impl Into<String>) -> Envelope<U> {
        Envelope { payload,
                   schema_name: schema_name.into(),
                   producer: self.producer.clone(),
                   lineage: self.lineage.clone(),
                   execution_id: self.execution_id.clone(),
                   created_at: self.created_at }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Proyección con payload JSON genérico.
    pub fn erase(&self) -> Result<Envelope<Value>, serde_json::Error> {
        let payload = serde_json::to_value(&self.payload)?;
        Ok(self.restamped(payload, self.schema_name.clone()))
    }
}

impl Envelope<Value> {
    /// Decodifica el payload al esquema `S` (sin validación estructural;
    /// para eso está `Validator`).
    pub fn decode<S: Schema>(&self) -> Result<Envelope<S>, serde_json::Error> {
        let payload: S = serde_json::from_value(self.payload.clone())?;
        Ok(self.restamped(payload, self.schema_name.clone()))
    }

    /// Hash estable de `{schema_name, payload}`; ignora timestamps y linaje.
    pub fn fingerprint(&self) -> String {
        hash_value(&json!({ "schema_name": self.schema_name, "payload": self.payload }))
    }
}

impl<T: PartialEq> PartialEq for Envelope<T> {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload && self.schema_name == other.schema_name
    }
}
