//! Process configuration, read once from the environment at start-up.
//!
//! - `TRACKER_BIND_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `TRACKER_SEED_ITEMS`: comma-separated `name=total` pairs seeded into the
//!   catalog. Unset means the default classroom catalog; empty means none.
//! - `TRACKER_LOG_FORMAT`: `json` (default) or `pretty`

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

use tracker_core::InventoryResult;
use tracker_inventory::{InventoryManager, DEFAULT_ITEMS};
use tracker_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "TRACKER_BIND_ADDR";
pub const SEED_ITEMS_VAR: &str = "TRACKER_SEED_ITEMS";
pub const LOG_FORMAT_VAR: &str = "TRACKER_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TRACKER_BIND_ADDR='{value}' is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("TRACKER_SEED_ITEMS entry '{0}' must look like name=total")]
    InvalidSeedEntry(String),

    #[error("TRACKER_LOG_FORMAT: {0}")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub seed_items: Vec<(String, i64)>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr { value, source })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let seed_items = match lookup(SEED_ITEMS_VAR) {
            Some(value) => parse_seed_items(&value)?,
            None => DEFAULT_ITEMS
                .iter()
                .map(|(name, total)| (name.to_string(), *total))
                .collect(),
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => value.parse().map_err(ConfigError::InvalidLogFormat)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            seed_items,
            log_format,
        })
    }

    /// A manager holding the configured seed catalog.
    pub fn seeded_manager(&self) -> InventoryResult<InventoryManager> {
        InventoryManager::with_items(
            self.seed_items
                .iter()
                .map(|(name, total)| (name.as_str(), *total)),
        )
    }
}

fn parse_seed_items(value: &str) -> Result<Vec<(String, i64)>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<(String, i64), ConfigError> {
            let (name, total) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidSeedEntry(entry.to_string()))?;
            let total = total
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSeedEntry(entry.to_string()))?;
            Ok((name.trim().to_string(), total))
        })
        .collect()
}
