pub mod config;
pub mod error;

pub use config::{
    Config, LocationConfig, LoggingConfig, Units, ValidationResult, WeatherConfig, API_KEY_ENV,
};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging.
///
/// `RUST_LOG` wins over `default_level`. Output goes to stderr so the
/// rendered dashboard on stdout stays clean.
pub fn init(default_level: &str) -> Result<()> {
    let level = match default_level.trim() {
        "" => "info",
        level => level,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    tracing::debug!("Skycast core initialized");
    Ok(())
}
