pub mod config;
pub mod error;

pub use config::{Config, UiConfig, ValidationResult, WeatherConfig, API_KEY_ENV};
pub use error::{ConfigError, ReqwestErrorExt, StorageError, WeatherError};

use anyhow::Result;

/// Initialize tracing for the application.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("Hava core initialized");
    Ok(())
}
