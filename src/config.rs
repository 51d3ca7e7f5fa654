//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/kicktree/kicktree.toml`
//! 3. Environment variables: `KICKTREE_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_KICKBACK_RATE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Default member data file when the CLI argument is omitted
    pub data_file: Option<PathBuf>,
    /// Kickback rate used by generated datasets
    pub default_kickback_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            default_kickback_rate: DEFAULT_KICKBACK_RATE,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("default_kickback_rate", DEFAULT_KICKBACK_RATE)?;

        if let Some(path) = Self::global_config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("KICKTREE"));

        builder.build()?.try_deserialize()
    }

    /// `$XDG_CONFIG_HOME/kicktree/kicktree.toml` (platform equivalent elsewhere)
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "kicktree")
            .map(|dirs| dirs.config_dir().join("kicktree.toml"))
    }
}
