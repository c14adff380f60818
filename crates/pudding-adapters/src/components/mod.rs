//! Componentes del pipeline de texto.

pub mod cleaner;
pub mod counter;
pub mod loader;

pub use cleaner::TextCleaner;
pub use counter::WordCounter;
pub use loader::TextLoader;

use pudding_core::{Component, Registration, Registry, Schema};

fn registration_of<C: Component>(component: &C) -> Registration {
    Registration::new(component.name(),
                      component.version(),
                      <C::Input as Schema>::NAME,
                      <C::Output as Schema>::NAME)
}

/// Registros (sólo metadatos) de los tres componentes.
pub fn registrations() -> Vec<Registration> {
    vec![registration_of(&TextLoader),
         registration_of(&TextCleaner),
         registration_of(&WordCounter)]
}

/// Registra los tres componentes en `registry`.
pub fn register_all(registry: &Registry) {
    for registration in registrations() {
        registry.register(registration);
    }
}
