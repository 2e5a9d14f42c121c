use super::model::ConfigurationModel;
use super::paths::resolve_config_path;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load the user's configuration file. No file at all yields the defaults.
pub fn load() -> Result<ConfigurationModel, ConfigError> {
    match resolve_config_path() {
        Some(path) => load_from(&path),
        None => Ok(ConfigurationModel::default()),
    }
}

pub fn load_from(path: &Path) -> Result<ConfigurationModel, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut cfg = serde_yaml::from_str::<ConfigurationModel>(&contents).map_err(|source| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    cfg.set_source_path(path.to_path_buf());
    Ok(cfg)
}
