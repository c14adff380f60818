//! Pipeline de texto completo sobre un store en memoria.

use std::sync::Arc;

use pudding_adapters::{CleanedText, TextCleaner, TextInput, TextLoader, WordCounter, WordStats};
use pudding_core::{Component, InMemorySampleStore, InputSource, ProcessError, RunConfig, Schema, Unit};
use serde_json::{json, Value};

const SAMPLE_TEXT: &str = "
    Hello World! This is a TEST of the pudding pipeline framework.
    It should handle    extra spaces, MIXED case, and special characters!!!
    Em—dashes, ellipses… and café résumé naïve 你好 🍮
";

#[test]
fn loader_cleaner_counter_end_to_end() {
    let store = Arc::new(InMemorySampleStore::new());
    let loader = Unit::new(TextLoader, store.clone()).expect("loader");
    let cleaner = Unit::new(TextCleaner, store.clone()).expect("cleaner");
    let counter = Unit::new(WordCounter, store).expect("counter");
    let cfg = RunConfig::debug();

    let loaded = loader.run(json!({"text": SAMPLE_TEXT, "source": "demo"}), &cfg);
    assert!(loaded.is_success(), "{:?}", loaded.error());

    let cleaned = cleaner.run(&loaded, &cfg);
    let cleaned_text: &CleanedText = cleaned.payload().expect("cleaned");
    assert_eq!(cleaned_text.changes_made,
               vec!["removed_extra_whitespace", "converted_to_lowercase", "removed_special_characters"]);
    assert!(cleaned_text.text.starts_with("hello world this is a test"));
    assert_eq!(cleaned_text.source.as_deref(), Some("demo"));

    let counted = counter.run(&cleaned, &cfg);
    let stats: &WordStats = counted.payload().expect("stats");
    assert!(stats.total_words > stats.unique_words);
    assert!(stats.most_common_words.len() <= 5);
    assert_eq!(stats.source.as_deref(), Some("demo"));

    let lineage: Vec<&str> = counted.output()
                                    .map(|e| e.lineage().iter().map(|r| r.name.as_str()).collect())
                                    .unwrap_or_default();
    assert_eq!(lineage, vec!["text_loader", "text_cleaner", "word_counter"]);
    assert_eq!(counted.output().map(|e| e.schema_name()), Some(WordStats::NAME));
}

#[test]
fn loader_output_cannot_feed_counter_directly() {
    let store = Arc::new(InMemorySampleStore::new());
    let loader = Unit::new(TextLoader, store.clone()).expect("loader");
    let counter = Unit::new(WordCounter, store).expect("counter");

    let loaded = loader.run(InputSource::from_schema(&TextInput::new("a b", None)).expect("source"),
                            &RunConfig::default());
    let out = counter.run(&loaded, &RunConfig::default());
    let message = out.error().map(ToString::to_string).unwrap_or_default();
    assert!(message.contains("CleanedText") && message.contains("TextInput"), "{message}");
}

#[test]
fn cleaner_recovers_after_invalid_input() {
    let cleaner = Unit::new(TextCleaner, Arc::new(InMemorySampleStore::new())).expect("cleaner");
    let bad = cleaner.run(json!({"wrong_field": "This won't work"}), &RunConfig::default());
    assert!(bad.error()
               .and_then(|e| e.field_errors())
               .map(|f| f.is_missing("text") && f.is_extra("wrong_field"))
               .unwrap_or(false));

    let good = cleaner.run(json!({"text": "This will work", "source": "recovery"}), &RunConfig::default());
    assert_eq!(good.payload().map(|c| c.text.as_str()), Some("this will work"));
}

#[test]
fn counter_accepts_text_without_changes_made() {
    let counter = Unit::new(WordCounter, Arc::new(InMemorySampleStore::new())).expect("counter");
    let out = counter.run(json!({"text": "a b a"}), &RunConfig::default());
    assert!(out.is_success(), "{:?}", out.error());
    assert_eq!(out.payload().map(|s| (s.total_words, s.unique_words)), Some((3, 2)));
    assert_eq!(out.input().map(|e| e.payload().get("changes_made").is_none()), Some(true));
}

/// Conteo directo sobre texto cargado: adapta `TextInput` a `CleanedText`.
struct LoadedCounter;

impl Component for LoadedCounter {
    type Input = CleanedText;
    type Output = WordStats;

    fn name(&self) -> &str {
        "loaded_counter"
    }

    fn process(&self, input: CleanedText) -> Result<WordStats, ProcessError> {
        Ok(WordCounter::stats(&input.text, input.source))
    }

    fn prepare_input(&self, mut raw: Value) -> Value {
        if let Some(obj) = raw.as_object_mut() {
            obj.insert("changes_made".into(), json!(["adapted_from_text_input"]));
        }
        raw
    }

    fn accepts_schema(&self, schema_name: &str) -> bool {
        schema_name == TextInput::NAME
    }
}

#[test]
fn adapting_component_consumes_loader_outcome() {
    let store = Arc::new(InMemorySampleStore::new());
    let loader = Unit::new(TextLoader, store.clone()).expect("loader");
    let counter = Unit::new(LoadedCounter, store).expect("counter");

    let loaded = loader.run(json!({"text": "a b"}), &RunConfig::default());
    let out = counter.run(&loaded, &RunConfig::default());
    assert!(out.is_success(), "{:?}", out.error());
    assert_eq!(out.payload().map(|s| s.total_words), Some(2));
    assert_eq!(out.input().map(|e| e.payload()["changes_made"].clone()),
               Some(json!(["adapted_from_text_input"])));
    let lineage: Vec<&str> = out.output()
                                .map(|e| e.lineage().iter().map(|r| r.name.as_str()).collect())
                                .unwrap_or_default();
    assert_eq!(lineage, vec!["text_loader", "loaded_counter"]);
}
