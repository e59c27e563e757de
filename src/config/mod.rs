pub mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, ReportConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/capnalyx/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("capnalyx"))
}

/// Get the default config file path (~/.config/capnalyx/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/capnalyx/config.yaml), and a missing default file yields the
///   built-in configuration.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => match get_config_path() {
            Ok(p) => p,
            Err(_) => return Ok(Config::default()),
        },
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(
            "no config at {}, using built-in rubric",
            config_path.display()
        );
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    tracing::debug!("loaded config from {}", config_path.display());
    Ok(config)
}
