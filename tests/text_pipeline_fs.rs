//! Pipeline completo sobre disco a través de la fachada `pudding`.

use std::sync::Arc;

use pudding::pudding_adapters::{TextCleaner, TextLoader, WordCounter};
use pudding::pudding_core::{Chain, Direction, Registry, RunConfig, SampleStore, Unit};
use pudding::pudding_persistence::FsSampleStore;
use pudding::run_batch;
use serde_json::{json, Value};

#[test]
fn debug_chain_persists_every_stage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FsSampleStore::new(dir.path()));
    let loader = Unit::new(TextLoader, store.clone()).expect("loader");
    let cleaner = Unit::new(TextCleaner, store.clone()).expect("cleaner");
    let counter = Unit::new(WordCounter, store.clone()).expect("counter");

    let chain = Chain::new(&loader).then(&cleaner).then(&counter);
    let outcomes = chain.run_all(json!({"text": "Hello hello WORLD", "source": "fs"}), &RunConfig::debug());
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.is_success()));

    for name in ["text_loader", "text_cleaner", "word_counter"] {
        let unit_dir = dir.path().join(name);
        let files = std::fs::read_dir(&unit_dir).expect("unit dir").count();
        assert_eq!(files, 2, "{name} should have one input and one output");
    }

    let stats = store.latest(counter.name(), Direction::Output)
                     .expect("latest")
                     .expect("some output");
    assert_eq!(stats.schema_name(), "WordStats");
    assert_eq!(stats.payload()["most_common_words"][0], json!(["hello", 2]));
    assert_eq!(stats.lineage().len(), 3);
}

#[test]
fn batch_runs_are_independent_and_ordered() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FsSampleStore::new(dir.path()));
    let loader = Unit::new(TextLoader, store.clone()).expect("loader");

    let inputs: Vec<Value> = (0..16).map(|i| json!({"text": format!("doc {i}")})).collect();
    let outcomes = run_batch(&loader, inputs, &RunConfig::testing());

    assert_eq!(outcomes.len(), 16);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.payload().map(|t| t.text.clone()), Some(format!("doc {i}")));
    }
    // Sin sobrescrituras aunque varias escrituras caigan en el mismo ms.
    assert_eq!(store.list(loader.name(), Some(Direction::Output)).expect("list").len(), 16);
}

#[test]
fn registry_reflects_last_registration() {
    let registry = Registry::new();
    let store = Arc::new(FsSampleStore::new(std::env::temp_dir()));
    let first = Arc::new(Unit::new(TextLoader, store.clone()).expect("loader"));
    let second = Arc::new(Unit::new(TextLoader, store).expect("loader"));
    registry.register_unit(&first);
    registry.register_unit(&second);
    assert_eq!(registry.list(), vec!["text_loader"]);

    drop(first);
    assert!(registry.handle("text_loader").is_some(), "second instance is still alive");
}
