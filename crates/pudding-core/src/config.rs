//! Configuración de ejecución (`RunConfig`).
//!
//! El modo determina qué se persiste y cómo se etiqueta la ejecución:
//! - `Debug`: guarda entrada y salida.
//! - `Production`: no guarda nada; siempre lleva `execution_id` (se genera un
//!   UUID v4 si no se provee).
//! - `Testing`: guarda sólo la salida.
//! - `Custom`: flags a elección del caller.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::LOCAL_EXECUTION_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Debug,
    Production,
    Testing,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRunConfig")]
pub struct RunConfig {
    mode: RunMode,
    save_input: bool,
    save_output: bool,
    execution_id: Option<String>,
    skip_compatibility_check: bool,
}

impl RunConfig {
    pub fn debug() -> Self {
        Self::with_mode(RunMode::Debug, true, true)
    }

    /// Config de producción. Sin id explícito se genera uno.
    pub fn production(execution_id: Option<String>) -> Self {
        let id = execution_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        Self::with_mode(RunMode::Production, false, false).with_execution_id(id)
    }

    pub fn testing() -> Self {
        Self::with_mode(RunMode::Testing, false, true)
    }

    pub fn custom(save_input: bool, save_output: bool) -> Self {
        Self::with_mode(RunMode::Custom, save_input, save_output)
    }

    fn with_mode(mode: RunMode, save_input: bool, save_output: bool) -> Self {
        Self { mode,
               save_input,
               save_output,
               execution_id: None,
               skip_compatibility_check: false }
    }

    pub fn with_execution_id(mut self, execution_id: impl Into<String>) -> Self {
        self.execution_id = Some(execution_id.into());
        self
    }

    /// Omite la verificación de identidad de esquema de la entrada. La
    /// validación estructural se mantiene.
    pub fn skip_compatibility_check(mut self) -> Self {
        self.skip_compatibility_check = true;
        self
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn save_input(&self) -> bool {
        self.save_input
    }

    pub fn save_output(&self) -> bool {
        self.save_output
    }

    pub fn execution_id(&self) -> Option<&str> {
        self.execution_id.as_deref()
    }

    pub fn skips_compatibility_check(&self) -> bool {
        self.skip_compatibility_check
    }

    pub fn is_debug(&self) -> bool {
        self.mode == RunMode::Debug
    }

    /// `execution_id` efectivo: el configurado o uno local generado.
    pub fn resolve_execution_id(&self) -> String {
        match &self.execution_id {
            Some(id) => id.clone(),
            None => format!("{LOCAL_EXECUTION_PREFIX}-{}", Uuid::new_v4()),
        }
    }
}

/// Config deserializada cuyos flags contradicen el modo declarado.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("run mode {mode:?} requires save_input={save_input} and save_output={save_output}")]
pub struct InvalidRunConfig {
    pub mode: RunMode,
    pub save_input: bool,
    pub save_output: bool,
}

/// Forma serializada; pasa por los presets al deserializar.
#[derive(Deserialize)]
struct RawRunConfig {
    mode: RunMode,
    save_input: bool,
    save_output: bool,
    #[serde(default)]
    execution_id: Option<String>,
    #[serde(default)]
    skip_compatibility_check: bool,
}

impl TryFrom<RawRunConfig> for RunConfig {
    type Error = InvalidRunConfig;

    fn try_from(raw: RawRunConfig) -> Result<Self, Self::Error> {
        let mut config = match raw.mode {
            RunMode::Debug => RunConfig::debug(),
            RunMode::Production => RunConfig::production(raw.execution_id.clone()),
            RunMode::Testing => RunConfig::testing(),
            RunMode::Custom => RunConfig::custom(raw.save_input, raw.save_output),
        };
        if (config.save_input, config.save_output) != (raw.save_input, raw.save_output) {
            return Err(InvalidRunConfig { mode: raw.mode,
                                          save_input: config.save_input,
                                          save_output: config.save_output });
        }
        if let Some(id) = raw.execution_id {
            config = config.with_execution_id(id);
        }
        config.skip_compatibility_check = raw.skip_compatibility_check;
        Ok(config)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::custom(false, false)
    }
}
