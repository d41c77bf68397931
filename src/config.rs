//! Configuration file management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/todo-tui";

/// Errors that can occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Home directory could not be located
    #[error("Failed to find $HOME directory")]
    NoHomeDirectory,

    /// Configuration file could not be read or created
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid YAML
    #[error("Malformed configuration file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Oversees management of the configuration file.
///
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted task data.
    pub data_dir: PathBuf,
    /// Directory export files are written into.
    pub export_dir: PathBuf,
}

/// Define specification for configuration file.
///
#[derive(Debug, Default, Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl Config {
    /// Load the configuration from the default directory or the custom path
    /// if provided, creating the directory on first run. A missing config
    /// file is not an error; every field has a default.
    ///
    pub fn load(custom_path: Option<&str>) -> Result<Config, ConfigError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path)?;
        }

        let file_path = dir_path.join(FILE_NAME);
        let spec = if file_path.exists() {
            let contents = fs::read_to_string(&file_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            FileSpec::default()
        };

        Ok(Config {
            data_dir: spec.data_dir.unwrap_or_else(|| dir_path.clone()),
            export_dir: spec
                .export_dir
                .or_else(|| env::current_dir().ok())
                .unwrap_or(dir_path),
        })
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, ConfigError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(DEFAULT_DIRECTORY_PATH)),
            None => Err(ConfigError::NoHomeDirectory),
        }
    }
}
