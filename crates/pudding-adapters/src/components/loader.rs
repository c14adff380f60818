use pudding_core::{Component, ProcessError};

use crate::schemas::TextInput;

/// Valida el texto de entrada y lo deja pasar sin cambios.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLoader;

impl Component for TextLoader {
    type Input = TextInput;
    type Output = TextInput;

    fn name(&self) -> &str {
        "text_loader"
    }

    fn process(&self, input: TextInput) -> Result<TextInput, ProcessError> {
        Ok(input)
    }
}
