//! Configuration file loader for the `.skysearch/` directory.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::models::AppConfig;
use std::path::Path;

/// Loads configuration from `<root>/.skysearch/config.toml`.
///
/// A missing directory or file yields the default configuration rather
/// than an error; the file only needs to name the settings it overrides.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, has
/// invalid TOML syntax, or contains inconsistent timing values.
///
/// # Example
///
/// ```rust,no_run
/// use sky_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Backend at {}", config.backend.base_url);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let config_path = root.join(".skysearch").join("config.toml");

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
        path: config_path.clone(),
        source,
    })?;

    let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path.clone(),
        source,
    })?;

    validate(&config, &config_path)?;

    Ok(config)
}

fn validate(config: &AppConfig, path: &Path) -> ConfigResult<()> {
    if config.polling.poll_interval_ms == 0 {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "poll_interval_ms must be greater than zero".to_string(),
        });
    }

    if config.polling.grace_delay_ms >= config.polling.overall_timeout_ms {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "grace_delay_ms must be less than overall_timeout_ms".to_string(),
        });
    }

    Ok(())
}
