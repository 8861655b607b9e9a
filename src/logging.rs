//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing` con salida por consola. `RUST_LOG` tiene prioridad
//! sobre el nivel configurado por CLI.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global
///
/// Falla si `level` no es un filtro válido o si ya había un subscriber.
pub fn init(level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_thread_names(true))
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_an_error() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(init("webserver=notalevel").is_err());
        }
    }
}
