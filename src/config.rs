use crate::{Layout, TruncationPolicy, DEFAULT_ROUTE_PATH};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error in reading config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("error in parsing config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid layout: {0}")]
    Layout(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub path: PathBuf,
    pub strict: bool,
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ROUTE_PATH),
            strict: false,
            layout: Layout::default(),
        }
    }
}

impl Config {
    const FILENAME: &'static str = "config.toml";

    pub fn parse(mut filename: &str) -> Result<Config, ConfigError> {
        if filename.is_empty() {
            filename = Config::FILENAME;
        }

        let mut f = File::open(filename)?;
        let mut contents = String::new();
        f.read_to_string(&mut contents)?;

        Config::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.layout.validate().map_err(ConfigError::Layout)?;

        Ok(config)
    }

    pub fn policy(&self) -> TruncationPolicy {
        if self.strict {
            TruncationPolicy::Strict
        } else {
            TruncationPolicy::Lenient
        }
    }
}
