use pudding_core::{Component, ProcessError};

use crate::schemas::{CleanedText, TextInput};

pub const REMOVED_EXTRA_WHITESPACE: &str = "removed_extra_whitespace";
pub const CONVERTED_TO_LOWERCASE: &str = "converted_to_lowercase";
pub const REMOVED_SPECIAL_CHARACTERS: &str = "removed_special_characters";

/// Normaliza texto: colapsa espacios, pasa a minúsculas y deja sólo
/// `[a-z0-9]` y espacios. Cada paso que cambia algo se anota en
/// `changes_made`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner;

impl TextCleaner {
    pub fn clean(text: &str) -> (String, Vec<String>) {
        let mut changes = Vec::new();

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed != text {
            changes.push(REMOVED_EXTRA_WHITESPACE.to_string());
        }

        let lowered = collapsed.to_lowercase();
        if lowered != collapsed {
            changes.push(CONVERTED_TO_LOWERCASE.to_string());
        }

        let stripped: String = lowered.chars()
                                      .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
                                      .collect();
        if stripped.len() != lowered.len() {
            changes.push(REMOVED_SPECIAL_CHARACTERS.to_string());
        }

        (stripped, changes)
    }
}

impl Component for TextCleaner {
    type Input = TextInput;
    type Output = CleanedText;

    fn name(&self) -> &str {
        "text_cleaner"
    }

    fn process(&self, input: TextInput) -> Result<CleanedText, ProcessError> {
        let (text, changes_made) = Self::clean(&input.text);
        Ok(CleanedText { text,
                         source: input.source,
                         changes_made })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_lowercases() {
        let (text, changes) = TextCleaner::clean("  Hello   World ");
        assert_eq!(text, "hello world");
        assert_eq!(changes, vec![REMOVED_EXTRA_WHITESPACE, CONVERTED_TO_LOWERCASE]);
    }

    #[test]
    fn strips_non_ascii_and_punctuation() {
        let (text, changes) = TextCleaner::clean("café, résumé! 🍮 ok");
        assert_eq!(text, "caf rsum  ok");
        assert_eq!(changes, vec![REMOVED_SPECIAL_CHARACTERS]);
    }

    #[test]
    fn clean_text_reports_no_changes() {
        let (text, changes) = TextCleaner::clean("already clean 42");
        assert_eq!(text, "already clean 42");
        assert!(changes.is_empty());
    }
}
