//! Configuración del store desde variables de entorno.
//! Usa `PUDDING_SAMPLE_DIR` (por defecto `sample_data`).

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

pub const SAMPLE_DIR_VAR: &str = "PUDDING_SAMPLE_DIR";
pub const DEFAULT_SAMPLE_DIR: &str = "sample_data";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub sample_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(sample_dir: impl Into<PathBuf>) -> Self {
        Self { sample_dir: sample_dir.into() }
    }

    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let sample_dir = env::var(SAMPLE_DIR_VAR).ok()
                                                 .filter(|v| !v.trim().is_empty())
                                                 .unwrap_or_else(|| DEFAULT_SAMPLE_DIR.to_string());
        Self::new(sample_dir)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_DIR)
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_to_sample_data() {
        assert_eq!(StoreConfig::default().sample_dir, PathBuf::from("sample_data"));
    }
}
