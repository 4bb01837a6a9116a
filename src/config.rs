use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, VertagError};

/// Configuration for vertag.
///
/// Everything has a default; with no config file present the tool behaves
/// exactly like the zero-argument invocation: tag `ver{count}`, push to
/// `origin`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_pattern() -> String {
    crate::naming::DEFAULT_PATTERN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            pattern: default_pattern(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `vertag.toml` in the repository directory
/// 3. `.vertag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_path` - Repository directory searched for `vertag.toml`
pub fn load_config(config_path: Option<&str>, repo_path: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if repo_path.join("vertag.toml").exists() {
        fs::read_to_string(repo_path.join("vertag.toml"))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".vertag.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| VertagError::config(e.to_string()))?;
    Ok(config)
}
