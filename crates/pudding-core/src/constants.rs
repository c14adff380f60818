//! Constantes del core.
//!
//! Agrupa valores estáticos que forman parte del contrato observable: el
//! formato de los nombres de archivo de muestras y el prefijo de los
//! `execution_id` generados localmente. Cambiarlos rompe la compatibilidad con
//! muestras ya persistidas.

/// Formato `chrono` del sello temporal de una muestra (`YYYYMMDD_HHMMSS_mmm`).
pub const SAMPLE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";

/// Extensión de los archivos de muestra.
pub const SAMPLE_EXTENSION: &str = "json";

/// Prefijo de los `execution_id` generados cuando la config no trae uno.
pub const LOCAL_EXECUTION_PREFIX: &str = "local";

/// Longitud máxima de un nombre de unidad.
pub const MAX_UNIT_NAME_LEN: usize = 64;
