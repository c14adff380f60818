//! pudding-adapters: esquemas y componentes de demostración sobre texto.
//!
//! Pipeline de ejemplo: `text_loader` (TextInput -> TextInput) ->
//! `text_cleaner` (TextInput -> CleanedText) -> `word_counter`
//! (CleanedText -> WordStats). Lo usan los tests de integración y el binario
//! de demo.

pub mod components;
pub mod schemas;

pub use components::{register_all, registrations, TextCleaner, TextLoader, WordCounter};
pub use schemas::{CleanedText, TextInput, WordStats};
