//! Recorrido de demostración: pipeline de texto con store en disco.
//!
//! `PUDDING_SAMPLE_DIR` (o `.env`) elige dónde se guardan las muestras;
//! `RUST_LOG` controla el nivel de log.

use std::sync::Arc;

use log::info;
use pudding::logging;
use pudding::pudding_adapters::{TextCleaner, TextLoader, WordCounter};
use pudding::pudding_core::{Direction, InputSource, Registry, RunConfig, Unit};
use pudding::pudding_persistence::{init_dotenv, FsSampleStore, StoreConfig};
use pudding::DemoError;
use serde_json::json;

const SAMPLE_TEXT: &str = r#"
    Hello World! This is a TEST of the pudding pipeline framework.
    It should handle    extra spaces, MIXED case, and special characters!!!
    Let's see how it works… "with quotes" and 'smart quotes' too!
    Em—dashes, ellipses… and café résumé naïve 你好 🍮
"#;

type Store = FsSampleStore;

fn banner(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Crea las tres unidades sobre `store` y las registra en el registro global.
fn build_units(store: &Arc<Store>)
               -> Result<(Arc<Unit<TextLoader, Store>>, Arc<Unit<TextCleaner, Store>>, Arc<Unit<WordCounter, Store>>),
                         DemoError> {
    let loader = Arc::new(Unit::new(TextLoader, store.clone())?);
    let cleaner = Arc::new(Unit::new(TextCleaner, store.clone())?);
    let counter = Arc::new(Unit::new(WordCounter, store.clone())?);
    let registry = Registry::global();
    registry.register_unit(&loader);
    registry.register_unit(&cleaner);
    registry.register_unit(&counter);
    Ok((loader, cleaner, counter))
}

fn demo_basic_pipeline(store: &Arc<Store>) -> Result<(), DemoError> {
    banner("DEMO 1: Basic Pipeline Execution");
    let (loader, cleaner, counter) = build_units(store)?;
    let cfg = RunConfig::debug();

    println!("\n1. Running full pipeline with debug mode:");
    let loaded = loader.run(json!({"text": SAMPLE_TEXT, "source": "demo"}), &cfg);
    println!("   Loader: success={}", loaded.is_success());

    let cleaned = cleaner.run(&loaded, &cfg);
    println!("   Cleaner: success={}", cleaned.is_success());
    if let Some(c) = cleaned.payload() {
        println!("   Changes made: {:?}", c.changes_made);
    }

    let counted = counter.run(&cleaned, &cfg);
    println!("   Counter: success={}", counted.is_success());
    if let Some(stats) = counted.payload() {
        println!("   Stats: {} words, {} unique", stats.total_words, stats.unique_words);
        println!("   Most common: {:?}", stats.most_common_words);
    }
    if let Some(env) = counted.output() {
        let stages: Vec<&str> = env.lineage().iter().map(|r| r.name.as_str()).collect();
        println!("   Lineage: {}", stages.join(" -> "));
    }
    Ok(())
}

fn demo_replay_mode(store: &Arc<Store>) -> Result<(), DemoError> {
    banner("DEMO 2: Replay Mode");
    let cleaner = Unit::new(TextCleaner, store.clone())?;

    println!("\n1. Replaying last cleaner execution:");
    let result = cleaner.run(InputSource::Replay, &RunConfig::default());
    match (result.payload(), result.error()) {
        (Some(c), _) => {
            println!("   Success! Replayed from saved input");
            println!("   Is replay: {}", result.metadata().is_replay);
            let preview: String = c.text.chars().take(50).collect();
            println!("   Text preview: {preview}...");
        }
        (None, Some(err)) => println!("   Error: {err}"),
        (None, None) => {}
    }
    Ok(())
}

fn demo_chaining_methods(store: &Arc<Store>) -> Result<(), DemoError> {
    banner("DEMO 3: Component Chaining Methods");
    let (loader, cleaner, counter) = build_units(store)?;
    let text = json!({"text": "Different chaining methods work seamlessly!", "source": "chain_demo"});

    println!("\n1. Method A: pass the outcome directly");
    let a = loader.run(text, &RunConfig::custom(false, true));
    let b = cleaner.run(&a, &RunConfig::testing());
    println!("   Success: {}", b.is_success());

    println!("\n2. Method B: pass the unit itself (uses its latest output)");
    let c = counter.run(InputSource::Unit(cleaner.as_ref()), &RunConfig::default());
    println!("   Success: {}", c.is_success());

    println!("\n3. Method C: load a specific sample");
    let samples = cleaner.list_samples(Some(Direction::Output)).unwrap_or_default();
    if let Some(first) = samples.first() {
        let d = counter.run(first.clone(), &RunConfig::default());
        println!("   Success: {}", d.is_success());
        println!("   Loaded from: {first}");
    }
    Ok(())
}

fn demo_error_handling(store: &Arc<Store>) -> Result<(), DemoError> {
    banner("DEMO 4: Error Handling");
    let cleaner = Unit::new(TextCleaner, store.clone())?;

    println!("\n1. Invalid input data:");
    let result = cleaner.run(json!({"wrong_field": "This won't work"}), &RunConfig::default());
    println!("   Error handled: {}", result.error().is_some());
    if let Some(err) = result.error() {
        println!("   Error message: {err}");
    }

    println!("\n2. Unit works after error:");
    let result = cleaner.run(json!({"text": "This will work", "source": "recovery"}), &RunConfig::default());
    println!("   Success: {}", result.is_success());
    Ok(())
}

fn demo_registry() -> Result<(), DemoError> {
    banner("DEMO 5: Component Registry");
    let registry = Registry::global();

    println!("\n1. Registered components:");
    for name in registry.list() {
        println!("   - {name}");
    }

    println!("\n2. Checking connections:");
    for (from, to) in [("text_loader", "text_cleaner"), ("text_cleaner", "word_counter"), ("text_loader", "word_counter")] {
        let (ok, reason) = registry.can_connect(from, to);
        println!("   {from} -> {to}: {ok}");
        if let Some(reason) = reason {
            println!("   Reason: {reason}");
        }
    }
    registry.ensure_connect("text_loader", "text_cleaner")?;
    Ok(())
}

fn demo_different_configs(store: &Arc<Store>) -> Result<(), DemoError> {
    banner("DEMO 6: Configuration Options");
    let loader = Unit::new(TextLoader, store.clone())?;
    let text = json!({"text": "Testing different configurations", "source": "config_demo"});

    println!("\n1. Debug mode (saves everything):");
    loader.run(text.clone(), &RunConfig::debug());
    println!("   Samples saved: {}", loader.list_samples(None).map(|s| s.len()).unwrap_or(0));

    println!("\n2. Production mode (no saving):");
    let result = loader.run(text.clone(), &RunConfig::production(Some("prod_001".into())));
    println!("   Execution ID: {}", result.metadata().execution_id);

    println!("\n3. Testing mode (output only):");
    let cfg = RunConfig::testing();
    let result = loader.run(text, &cfg);
    println!("   Debug mode: {}", cfg.is_debug());
    println!("   Saved: {:?}", result.metadata().saved.iter().map(ToString::to_string).collect::<Vec<_>>());
    Ok(())
}

fn main() -> Result<(), DemoError> {
    // .env primero: puede definir RUST_LOG.
    init_dotenv();
    logging::init();
    let config = StoreConfig::from_env();
    info!("sample store at {}", config.sample_dir.display());
    let store = Arc::new(FsSampleStore::from_config(&config));

    banner("PUDDING PIPELINE DEMO");
    demo_basic_pipeline(&store)?;
    demo_replay_mode(&store)?;
    demo_chaining_methods(&store)?;
    demo_error_handling(&store)?;
    demo_registry()?;
    demo_different_configs(&store)?;

    banner("KEY FEATURES DEMONSTRATED:");
    println!("1. One run() entry point for every input source");
    println!("2. Replay from the latest saved input");
    println!("3. Chaining by outcome, by unit and by sample");
    println!("4. Errors reported inside the outcome");
    println!("5. Registry with schema compatibility checks");
    println!("6. Debug / production / testing configurations");
    Ok(())
}
