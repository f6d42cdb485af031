use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::explore::{ExplorerOptions, MAX_GRID_ROOMS};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graphwalk: GraphwalkConfig,
    #[serde(default)]
    pub explorer: ExplorerOptions,
    #[serde(default)]
    pub world: WorldConfig,
}

/// Graphwalk-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GraphwalkConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GraphwalkConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Default demo grid explored by the CLI
#[derive(Debug, Clone, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_grid_side")]
    pub rows: u32,
    #[serde(default = "default_grid_side")]
    pub cols: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: default_grid_side(),
            cols: default_grid_side(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_grid_side() -> u32 {
    3
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in GRAPHWALK_CONFIG environment variable
    /// 2. ./graphwalk.toml in current directory
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config_path = Self::config_path();
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        Self::from_toml(&config_str)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))
    }

    /// Like [`Config::load`], but falls back to defaults when no config file
    /// exists. A file that exists but does not parse is still an error.
    pub fn load_or_default() -> Result<Self> {
        let _ = dotenv::dotenv();

        if Self::config_path().exists() {
            Self::load()
        } else {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn config_path() -> PathBuf {
        std::env::var("GRAPHWALK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("graphwalk.toml"))
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        let level = self.graphwalk.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "graphwalk.log_level must be one of {:?}, got {:?}",
                LOG_LEVELS,
                self.graphwalk.log_level
            );
        }

        if self.explorer.move_limit_factor == 0 {
            anyhow::bail!("explorer.move_limit_factor must be greater than 0");
        }

        if self.world.rows == 0 || self.world.cols == 0 {
            anyhow::bail!("world.rows and world.cols must be greater than 0");
        }
        let rooms = u64::from(self.world.rows) * u64::from(self.world.cols);
        if rooms > u64::from(MAX_GRID_ROOMS) {
            anyhow::bail!(
                "world.rows * world.cols must be at most {}, got {}",
                MAX_GRID_ROOMS,
                rooms
            );
        }

        Ok(())
    }
}
