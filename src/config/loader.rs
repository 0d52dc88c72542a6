//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ReceiverConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";
pub const UPLOAD_DIR_ENV: &str = "WEBHOOK_UPLOAD_DIR";
pub const RECORDS_DIR_ENV: &str = "WEBHOOK_RECORDS_DIR";
pub const LOG_LEVEL_ENV: &str = "WEBHOOK_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => write!(f, "Invalid value for {}: {:?}", var, value),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<ReceiverConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => ReceiverConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<ReceiverConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay environment variables onto a parsed config.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut ReceiverConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(value) = get(PORT_ENV) {
        config.listener.port = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: PORT_ENV, value })?;
    }
    if let Some(value) = get(UPLOAD_DIR_ENV) {
        config.storage.upload_dir = PathBuf::from(value);
    }
    if let Some(value) = get(RECORDS_DIR_ENV) {
        config.storage.records_dir = Some(PathBuf::from(value));
    }
    if let Some(value) = get(LOG_LEVEL_ENV) {
        config.observability.log_level = value;
    }

    Ok(())
}
