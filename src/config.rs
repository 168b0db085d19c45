use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::HUB_AIRPORT;
use crate::error::{RelayError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    pub rules: RulesConfig,
    pub cdm: CdmConfig,
    pub destinations: DestinationsConfig,
    pub publisher: PublisherConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Airport whose runways and milestones are suppressed
    pub hub_airport: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hub_airport: HUB_AIRPORT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CdmConfig {
    /// Correlation token written to every CDM date
    pub result: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DestinationsConfig {
    pub af_aidx: String,
    pub kl_aidx: String,
    pub kl_cdm: String,
}

impl Default for DestinationsConfig {
    fn default() -> Self {
        Self {
            af_aidx: "af-aidx".to_string(),
            kl_aidx: "kl-aidx".to_string(),
            kl_cdm: "kl-cdm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PublisherConfig {
    pub output_dir: PathBuf,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outbox"),
        }
    }
}

impl RelayConfig {
    /// Load from `$RELAY_CONFIG`, else `config.toml`. A missing default file
    /// yields the built-in defaults; a missing explicit file is an error.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_path(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_path(DEFAULT_CONFIG_PATH),
            Err(_) => {
                info!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
                Ok(Self::default())
            }
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: RelayConfig = toml::from_str(content)?;
        if config.rules.hub_airport.trim().is_empty() {
            return Err(RelayError::Config("rules.hub_airport must not be empty".to_string()));
        }
        Ok(config)
    }
}
