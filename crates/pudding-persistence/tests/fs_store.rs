//! Store en disco con unidades reales: replay, fuentes y adaptador async.

use std::sync::Arc;

use pudding_adapters::{TextCleaner, TextLoader, WordCounter};
use pudding_core::{Direction, ErrorKind, InputSource, Producer, RunConfig, SampleStore, Unit, UnitName};
use pudding_persistence::{AsyncSampleStore, FsSampleStore, Offloaded, StoreConfig};
use serde_json::json;

#[test]
fn load_after_save_round_trips_envelope() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FsSampleStore::new(dir.path());
    let unit = UnitName::new("text_loader").expect("name");
    let original = pudding_core::Envelope::new(json!({"text": "hola", "source": null}),
                                               "TextInput",
                                               Producer::new("text_loader", "1.0.0"),
                                               Some("e-1".into()));
    let id = store.save(&unit, Direction::Input, &original).expect("save");
    let loaded = store.load(&id).expect("load");
    assert_eq!(loaded, original);
    assert_eq!(loaded.execution_id(), Some("e-1"));
    assert_eq!(loaded.producer(), original.producer());
}

#[test]
fn replay_from_disk_across_store_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let payload = json!({"text": "Persisted  Text!", "source": "disk"});
    {
        let store = Arc::new(FsSampleStore::from_config(&StoreConfig::new(dir.path())));
        let cleaner = Unit::new(TextCleaner, store).expect("cleaner");
        assert!(cleaner.run(payload.clone(), &RunConfig::debug()).is_success());
    }

    // Nueva instancia sobre el mismo directorio.
    let store = Arc::new(FsSampleStore::new(dir.path()));
    let cleaner = Unit::new(TextCleaner, store).expect("cleaner");
    let replayed = cleaner.run(InputSource::Replay, &RunConfig::default());
    assert!(replayed.metadata().is_replay);
    assert_eq!(replayed.input().map(|e| e.payload().clone()), Some(payload));
    assert_eq!(replayed.payload().map(|c| c.text.as_str()), Some("persisted text"));
}

#[test]
fn unit_and_sample_sources_read_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FsSampleStore::new(dir.path()));
    let loader = Unit::new(TextLoader, store.clone()).expect("loader");
    let cleaner = Unit::new(TextCleaner, store.clone()).expect("cleaner");
    let counter = Unit::new(WordCounter, store).expect("counter");

    let loaded = loader.run(json!({"text": "Different chaining methods", "source": "chain_demo"}),
                            &RunConfig::custom(false, true));
    let cleaned = cleaner.run(&loaded, &RunConfig::testing());
    assert!(cleaned.is_success());

    let from_unit = counter.run(InputSource::Unit(&cleaner), &RunConfig::default());
    assert_eq!(from_unit.payload().map(|s| s.total_words), Some(3));

    let samples = cleaner.list_samples(Some(Direction::Output)).expect("list");
    assert_eq!(samples.len(), 1);
    let from_sample = counter.run(samples[0].clone(), &RunConfig::default());
    assert_eq!(from_sample.payload(), from_unit.payload());
}

#[test]
fn sample_with_wrong_schema_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FsSampleStore::new(dir.path()));
    let loader = Unit::new(TextLoader, store.clone()).expect("loader");
    let counter = Unit::new(WordCounter, store.clone()).expect("counter");

    let out = loader.run(json!({"text": "x"}), &RunConfig::testing());
    let id = out.metadata().saved[0].clone();
    let res = counter.run(id.clone(), &RunConfig::default());
    assert_eq!(res.error().map(|e| e.kind()), Some(ErrorKind::SchemaMismatch));
    assert_eq!(store.load_expecting(&id, "CleanedText").map_err(|e| e.kind()),
               Err(ErrorKind::SchemaMismatch));
}

#[test]
fn unwritable_root_fails_in_persisting_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Un archivo donde debería ir el directorio de la unidad.
    std::fs::write(dir.path().join("text_loader"), b"not a dir").expect("write");
    let loader = Unit::new(TextLoader, Arc::new(FsSampleStore::new(dir.path()))).expect("loader");

    let out = loader.run(json!({"text": "x"}), &RunConfig::testing());
    assert_eq!(out.error().map(|e| e.kind()), Some(ErrorKind::Io));
    assert_eq!(out.metadata().failed_at, Some(pudding_core::RunState::Persisting));
}

#[tokio::test]
async fn offloaded_store_runs_blocking_io_off_runtime() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Offloaded::new(Arc::new(FsSampleStore::new(dir.path())));
    let unit = UnitName::new("word_counter").expect("name");
    let env = pudding_core::Envelope::new(json!({"text": "a"}), "CleanedText", Producer::new("word_counter", "1.0.0"), None);

    assert!(store.latest(&unit, Direction::Output).await.expect("latest").is_none());
    let id = store.save(&unit, Direction::Output, &env).await.expect("save");
    assert_eq!(store.load(&id).await.expect("load"), env);
    assert_eq!(store.list(&unit, None).await.expect("list"), vec![id]);
    assert_eq!(store.latest(&unit, Direction::Output).await.expect("latest"), Some(env));
}
