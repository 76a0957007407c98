pub mod types;

use crate::error::{ConfigError, HealthServiceError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{Config, OutputConfig, OutputFormat, ResolveConfig};

const CONFIG_FILE_NAME: &str = ".healthservice.toml";

/// Get the global config file path (~/.healthservice.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (<dir>/.healthservice.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}

/// Load configuration.
///
/// An explicit path must exist and parse. Otherwise the local config in the
/// working directory is tried, then the global one, then defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)?;
        return parse_config(&content);
    }

    let candidates = std::env::current_dir()
        .ok()
        .map(|cwd| local_config_path(&cwd))
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        let loaded = fs::read_to_string(&path)
            .map_err(HealthServiceError::from)
            .and_then(|content| parse_config(&content));
        match loaded {
            Ok(config) => {
                log::debug!("Loaded configuration from {}", path.display());
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
        }
    }

    Ok(Config::default())
}
