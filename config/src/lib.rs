mod env;
mod error;
mod models;

pub use env::apply_env;
pub use error::ConfigError;
pub use models::{Config, GraphConfig, LlmConfig, WalkConfig};

use std::env as std_env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Attempts to find the configuration file.
/// First checks the current working directory, then falls back to ~/.config/chainwalk/chainwalk.yml
pub fn find_config_file() -> Result<PathBuf, ConfigError> {
    let cwd_config = std_env::current_dir()?.join("chainwalk.yml");
    if cwd_config.exists() {
        return Ok(cwd_config);
    }

    let home_dir = dirs::home_dir().ok_or(ConfigError::NotFound)?;
    let home_config = home_dir
        .join(".config")
        .join("chainwalk")
        .join("chainwalk.yml");
    if home_config.exists() {
        return Ok(home_config);
    }

    Err(ConfigError::NotFound)
}

/// Reads and parses a single YAML configuration file.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&contents)?;
    Ok(config)
}

/// Loads the process configuration once: an explicit file or the first file
/// found on the search path, then the environment on top.
///
/// Without an explicit path a missing file is fine, the environment alone
/// may carry every setting.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match explicit {
        Some(path) => load_config_file(path)?,
        None => match find_config_file() {
            Ok(path) => {
                debug!(path = %path.display(), "loading config file");
                load_config_file(&path)?
            }
            Err(ConfigError::NotFound) => Config::default(),
            Err(e) => return Err(e),
        },
    };

    apply_env(&mut config, process_env())?;
    Ok(config)
}

/// The process environment, skipping entries that are not valid UTF-8.
fn process_env() -> impl Iterator<Item = (String, String)> {
    std_env::vars_os().filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}
