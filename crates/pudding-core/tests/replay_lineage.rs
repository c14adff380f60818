//! Propiedades de replay, linaje y registro usando los componentes de texto.

use std::sync::Arc;

use pudding_adapters::{register_all, TextCleaner, TextLoader, WordCounter, WordStats};
use pudding_core::{Chain, Direction, ErrorKind, InMemorySampleStore, InputSource, Registry, RunConfig, SampleStore,
                   Unit};
use serde_json::json;

fn store() -> Arc<InMemorySampleStore> {
    Arc::new(InMemorySampleStore::new())
}

#[test]
fn replay_reproduces_saved_input_payload() {
    let cleaner = Unit::new(TextCleaner, store()).expect("cleaner");
    let payload = json!({"text": "Replay  ME", "source": "replay"});
    let first = cleaner.run(payload.clone(), &RunConfig::custom(true, false));
    assert!(first.is_success());

    let replayed = cleaner.run(InputSource::Replay, &RunConfig::default());
    assert!(replayed.metadata().is_replay);
    assert_eq!(replayed.input().map(|e| e.payload().clone()), Some(payload));
    assert_eq!(replayed.payload(), first.payload());
}

#[test]
fn chain_of_three_has_monotonic_lineage() {
    let shared = store();
    let loader = Unit::new(TextLoader, shared.clone()).expect("loader");
    let cleaner = Unit::new(TextCleaner, shared.clone()).expect("cleaner");
    let counter = Unit::new(WordCounter, shared).expect("counter");

    let chain = Chain::new(&loader).then(&cleaner).then(&counter);
    let out = chain.run(json!({"text": "one two two"}), &RunConfig::default());
    let stats: &WordStats = out.payload().expect("stats");
    assert_eq!(stats.total_words, 3);

    let lineage = out.output().map(|e| e.lineage().to_vec()).unwrap_or_default();
    assert_eq!(lineage.len(), 3);
    assert!(lineage.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn testing_config_persists_only_output() {
    let shared = store();
    let loader = Unit::new(TextLoader, shared.clone()).expect("loader");
    let out = loader.run(json!({"text": "x"}), &RunConfig::testing());
    assert_eq!(out.metadata().saved.len(), 1);
    assert_eq!(out.metadata().saved[0].direction(), Direction::Output);
    assert!(shared.latest(loader.name(), Direction::Input).expect("latest").is_none());
    assert!(shared.latest(loader.name(), Direction::Output).expect("latest").is_some());
}

#[test]
fn production_config_persists_nothing() {
    let shared = store();
    let loader = Unit::new(TextLoader, shared.clone()).expect("loader");
    let out = loader.run(json!({"text": "x"}), &RunConfig::production(None));
    assert!(out.is_success());
    assert!(out.metadata().saved.is_empty());
    assert!(shared.is_empty());
}

#[test]
fn registry_checks_text_pipeline_connections() {
    let registry = Registry::new();
    register_all(&registry);
    register_all(&registry);

    assert_eq!(registry.list(), vec!["text_loader", "text_cleaner", "word_counter"]);
    assert!(registry.can_connect("text_loader", "text_cleaner").0);
    assert!(registry.can_connect("text_cleaner", "word_counter").0);

    let (ok, reason) = registry.can_connect("text_loader", "word_counter");
    assert!(!ok);
    let reason = reason.unwrap_or_default();
    assert!(reason.contains("TextInput") && reason.contains("CleanedText"), "{reason}");

    let err = registry.ensure_connect("text_loader", "word_counter").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleSchema);
}

#[test]
fn global_registry_is_shared_and_clearable() {
    let loader = Arc::new(Unit::new(TextLoader, store()).expect("loader"));
    Registry::global().register_unit(&loader);
    assert!(Registry::global().handle("text_loader").is_some());
    Registry::global().clear();
    assert!(Registry::global().get("text_loader").is_none());
}
