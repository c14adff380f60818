//! Ejecución paralela de entradas independientes sobre una misma unidad.
//!
//! `Unit::run` no guarda estado entre llamadas, así que varias ejecuciones
//! pueden repartirse en el pool de `rayon`. Cada entrada produce su propio
//! `Outcome`, en el mismo orden que `inputs`. No hay reintentos ni
//! agrupación: es sólo un fan-out.

use pudding_core::{Component, Outcome, RunConfig, SampleStore, Unit, Validator};
use rayon::prelude::*;
use serde_json::Value;

pub fn run_batch<C, S, V>(unit: &Unit<C, S, V>, inputs: Vec<Value>, config: &RunConfig) -> Vec<Outcome<C::Output>>
    where C: Component,
          S: SampleStore,
          V: Validator
{
    inputs.into_par_iter().map(|raw| unit.run(raw, config)).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pudding_adapters::TextCleaner;
    use pudding_core::InMemorySampleStore;
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_input_order_and_isolates_failures() {
        let store = Arc::new(InMemorySampleStore::new());
        let cleaner = Unit::new(TextCleaner, store.clone()).expect("unit");
        let inputs = vec![json!({"text": "A"}), json!({"nope": 1}), json!({"text": "C"})];

        let outcomes = run_batch(&cleaner, inputs, &RunConfig::testing());
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].payload().map(|c| c.text.as_str()), Some("a"));
        assert!(!outcomes[1].is_success());
        assert_eq!(outcomes[2].payload().map(|c| c.text.as_str()), Some("c"));
        assert_eq!(store.len(), 2);
    }
}
