//! Logs para binarios.
//!
//! Las librerías del workspace sólo emiten registros con `log`; quien ejecuta
//! decide dónde van. Aquí se instala un subscriber `tracing-subscriber` que
//! también recoge los registros de `log`, filtrado con `RUST_LOG` (por
//! defecto `info`), a stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global. Devuelve `false` si ya había uno.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter)
                                  .with(fmt::layer().with_writer(std::io::stderr).compact())
                                  .try_init()
                                  .is_ok()
}
