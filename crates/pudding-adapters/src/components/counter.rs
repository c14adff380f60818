use indexmap::IndexMap;
use pudding_core::{Component, ProcessError};

use crate::schemas::{CleanedText, WordStats};

/// Cantidad de palabras reportadas en `most_common_words`.
pub const MOST_COMMON_LIMIT: usize = 5;

/// Estadísticas de palabras sobre texto ya limpio.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl WordCounter {
    pub fn stats(text: &str, source: Option<String>) -> WordStats {
        let words: Vec<&str> = text.split_whitespace().collect();

        // IndexMap conserva el orden de primera aparición para desempatar.
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for word in &words {
            *counts.entry(*word).or_insert(0) += 1;
        }

        let total_words = words.len();
        let average_word_length = if total_words == 0 {
            0.0
        } else {
            let chars: usize = words.iter().map(|w| w.chars().count()).sum();
            round2(chars as f64 / total_words as f64)
        };

        let mut ranked: Vec<(String, usize)> = counts.iter().map(|(w, n)| (w.to_string(), *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(MOST_COMMON_LIMIT);

        WordStats { total_words,
                    unique_words: counts.len(),
                    average_word_length,
                    most_common_words: ranked,
                    source }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Component for WordCounter {
    type Input = CleanedText;
    type Output = WordStats;

    fn name(&self) -> &str {
        "word_counter"
    }

    fn process(&self, input: CleanedText) -> Result<WordStats, ProcessError> {
        Ok(Self::stats(&input.text, input.source))
    }
}
