//! Registro de unidades y chequeo de compatibilidad de esquemas.
//!
//! Guarda a lo sumo un registro activo por nombre. Registrar un nombre ya
//! presente lo reemplaza (last-write-wins) y conserva su posición en `list()`.
//! `register` no está sincronizado entre callers: dos registros concurrentes
//! del mismo nombre compiten y gana el último observado. Quien necesite otra
//! garantía debe serializar el registro por fuera o usar `try_register`.
//!
//! Además de instancias explícitas (`Registry::new`) existe una instancia de
//! proceso (`Registry::global`), que se limpia con `clear()`.
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use indexmap::IndexMap;
use log::{info, warn};
use once_cell::sync::Lazy;

use crate::errors::RegistryError;
use crate::unit::{ComponentHandle, Descriptor};

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Registro de una unidad. La referencia a la instancia viva es débil: el
/// registro no mantiene unidades vivas.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub version: String,
    pub input_schema: String,
    pub output_schema: String,
    handle: Option<Weak<dyn ComponentHandle>>,
}

impl Registration {
    /// Registro sin instancia asociada (sólo metadatos).
    pub fn new(name: impl Into<String>,
               version: impl Into<String>,
               input_schema: impl Into<String>,
               output_schema: impl Into<String>)
               -> Self {
        Self { name: name.into(),
               version: version.into(),
               input_schema: input_schema.into(),
               output_schema: output_schema.into(),
               handle: None }
    }

    pub fn from_descriptor(descriptor: Descriptor) -> Self {
        Self::new(descriptor.name, descriptor.version, descriptor.input_schema, descriptor.output_schema)
    }

    /// Registro enlazado a una unidad viva.
    pub fn for_handle<H: ComponentHandle + 'static>(unit: &Arc<H>) -> Self {
        let handle: Arc<dyn ComponentHandle> = unit.clone();
        Self { handle: Some(Arc::downgrade(&handle)),
               ..Self::from_descriptor(unit.descriptor()) }
    }

    /// Instancia viva, si todavía existe.
    pub fn handle(&self) -> Option<Arc<dyn ComponentHandle>> {
        self.handle.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_live(&self) -> bool {
        self.handle().is_some()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<IndexMap<String, Registration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instancia compartida por todo el proceso.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Registration>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Registration>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserta o reemplaza. Devuelve el registro reemplazado, si lo había.
    pub fn register(&self, registration: Registration) -> Option<Registration> {
        let name = registration.name.clone();
        let replaced = self.write().insert(name.clone(), registration);
        match &replaced {
            Some(old) => warn!("component '{}' re-registered, replacing version {}", name, old.version),
            None => info!("component '{}' registered", name),
        }
        replaced
    }

    /// Registra una unidad viva.
    pub fn register_unit<H: ComponentHandle + 'static>(&self, unit: &Arc<H>) -> Option<Registration> {
        self.register(Registration::for_handle(unit))
    }

    /// Variante estricta: falla si el nombre ya está registrado.
    pub fn try_register(&self, registration: Registration) -> Result<(), RegistryError> {
        let mut entries = self.write();
        if entries.contains_key(&registration.name) {
            return Err(RegistryError::DuplicateName(registration.name));
        }
        info!("component '{}' registered", registration.name);
        entries.insert(registration.name.clone(), registration);
        Ok(())
    }

    /// `Ok` si la salida de `producer` es exactamente la entrada de
    /// `consumer`.
    pub fn ensure_connect(&self, producer: &str, consumer: &str) -> Result<(), RegistryError> {
        let entries = self.read();
        let from = entries.get(producer)
                          .ok_or_else(|| RegistryError::NotRegistered(producer.to_string()))?;
        let to = entries.get(consumer)
                        .ok_or_else(|| RegistryError::NotRegistered(consumer.to_string()))?;
        if from.output_schema != to.input_schema {
            return Err(RegistryError::IncompatibleSchema { producer: from.name.clone(),
                                                           output_schema: from.output_schema.clone(),
                                                           consumer: to.name.clone(),
                                                           input_schema: to.input_schema.clone() });
        }
        Ok(())
    }

    /// Igual que `ensure_connect`, como `(bool, motivo)`.
    pub fn can_connect(&self, producer: &str, consumer: &str) -> (bool, Option<String>) {
        match self.ensure_connect(producer, consumer) {
            Ok(()) => (true, None),
            Err(e) => (false, Some(e.to_string())),
        }
    }

    /// Nombres registrados, en orden de registro.
    pub fn list(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Registration> {
        self.read().get(name).cloned()
    }

    pub fn handle(&self, name: &str) -> Option<Arc<dyn ComponentHandle>> {
        self.read().get(name).and_then(Registration::handle)
    }

    pub fn unregister(&self, name: &str) -> Option<Registration> {
        self.write().shift_remove(name)
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(name: &str, version: &str, input: &str, output: &str) -> Registration {
        Registration::new(name, version, input, output)
    }

    fn text_registry() -> Registry {
        let registry = Registry::new();
        registry.register(reg("text_loader", "1.0.0", "TextInput", "TextInput"));
        registry.register(reg("text_cleaner", "1.0.0", "TextInput", "CleanedText"));
        registry.register(reg("word_counter", "1.0.0", "CleanedText", "WordStats"));
        registry
    }

    #[test]
    fn can_connect_requires_identical_schemas() {
        let registry = text_registry();
        assert_eq!(registry.can_connect("text_loader", "text_cleaner"), (true, None));
        assert_eq!(registry.can_connect("text_cleaner", "word_counter"), (true, None));

        let (ok, reason) = registry.can_connect("text_loader", "word_counter");
        assert!(!ok);
        let reason = reason.expect("reason");
        assert!(reason.contains("TextInput") && reason.contains("CleanedText"), "{reason}");
    }

    #[test]
    fn unknown_component_is_named_in_reason() {
        let registry = text_registry();
        let (ok, reason) = registry.can_connect("text_loader", "ghost");
        assert!(!ok);
        assert_eq!(reason.as_deref(), Some("component 'ghost' not registered"));
        assert_eq!(registry.ensure_connect("ghost", "text_loader"),
                   Err(RegistryError::NotRegistered("ghost".into())));
    }

    #[test]
    fn register_twice_keeps_one_entry_reflecting_second() {
        let registry = text_registry();
        let replaced = registry.register(reg("text_loader", "2.0.0", "TextInput", "TextInput"));
        assert_eq!(replaced.map(|r| r.version), Some("1.0.0".to_string()));
        assert_eq!(registry.list(), vec!["text_loader", "text_cleaner", "word_counter"]);
        assert_eq!(registry.get("text_loader").map(|r| r.version), Some("2.0.0".to_string()));
    }

    #[test]
    fn try_register_rejects_duplicates() {
        let registry = text_registry();
        let err = registry.try_register(reg("text_loader", "9", "A", "B")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("text_loader".into()));
        assert_eq!(registry.get("text_loader").map(|r| r.version), Some("1.0.0".to_string()));
    }

    #[test]
    fn unregister_and_clear() {
        let registry = text_registry();
        assert!(registry.unregister("text_cleaner").is_some());
        assert_eq!(registry.list(), vec!["text_loader", "word_counter"]);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn metadata_only_records_have_no_handle() {
        let registry = text_registry();
        assert!(registry.handle("text_loader").is_none());
        assert!(!registry.get("text_loader").map(|r| r.is_live()).unwrap_or(true));
    }
}
