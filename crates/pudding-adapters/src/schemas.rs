//! Esquemas del pipeline de texto.

use pudding_core::typed_schema;

// Texto crudo y, opcionalmente, de dónde viene.
typed_schema!(TextInput { text: String,
                          source: Option<String> });

// Texto normalizado + lista de transformaciones aplicadas.
typed_schema!(CleanedText { text: String,
                            source: Option<String>,
                            changes_made: Vec<String> = default });

typed_schema!(
    /// Estadísticas de palabras. `most_common_words` trae a lo sumo cinco
    /// pares `(palabra, frecuencia)`.
    WordStats {
        total_words: usize,
        unique_words: usize,
        average_word_length: f64,
        most_common_words: Vec<(String, usize)>,
        source: Option<String>,
    }
);

impl TextInput {
    pub fn new(text: impl Into<String>, source: Option<&str>) -> Self {
        Self { text: text.into(),
               source: source.map(str::to_string) }
    }
}
