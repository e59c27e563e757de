use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{get_config_path, Config};

const HEADER: &str = "\
# Capnalyx configuration
#
# Each rubric check passes when the metric matches its threshold and adds
# 20 points. Thresholds: \">N\", \">=N\", \"<N\", \"<=N\" or \"N..M\" (inclusive).
# Valuation tiers are tried top to bottom; the first matching growth tier
# sets the ARR multiple, otherwise default_multiple applies.
";

/// Write the built-in configuration to `path` (or the default config path).
///
/// Refuses to overwrite an existing file unless `force` is set. Returns the
/// path written.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }
    }

    let yaml = serde_saphyr::to_string(&Config::with_defaults())
        .context("Failed to serialize default config")?;

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(HEADER.as_bytes())
        .context("Failed to write config")?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(config_path)
}
