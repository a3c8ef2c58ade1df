//! Configuration loading for the accountant
//!
//! A single JSON file covers:
//! - HTTP server binding
//! - Import windows and lookbacks
//! - Exchange endpoints, credentials and paging
//! - Snapshot storage and the sync scheduler

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountantConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub dydx: DydxConfig,

    #[serde(default)]
    pub hyperliquid: HyperliquidConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AccountantConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `ACCOUNTANT_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("ACCOUNTANT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ACCOUNTANT_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("ACCOUNTANT_PORT={}", port)))?;
        }
        if let Some(path) = lookup("ACCOUNTANT_SNAPSHOT_PATH") {
            self.storage.snapshot_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dydx.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("dydx.base_url is empty".to_string()));
        }
        if self.hyperliquid.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "hyperliquid.base_url is empty".to_string(),
            ));
        }

        let paging = [
            ("dydx.page_limit", self.dydx.page_limit),
            ("dydx.fill_pages", self.dydx.fill_pages),
            ("dydx.order_pages", self.dydx.order_pages),
            ("dydx.position_pages", self.dydx.position_pages),
            ("dydx.funding_pages", self.dydx.funding_pages),
            ("hyperliquid.page_limit", self.hyperliquid.page_limit),
        ];
        if let Some((name, _)) = paging.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{} must be positive", name)));
        }

        if self.scheduler.enabled && self.scheduler.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "scheduler.interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Import windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Length of the fill window opened at the stored watermark
    #[serde(default = "default_order_fills_window_days")]
    pub order_fills_window_days: i64,
    #[serde(default = "default_lookback_days")]
    pub positions_lookback_days: i64,
    #[serde(default = "default_lookback_days")]
    pub fundings_lookback_days: i64,
}

fn default_order_fills_window_days() -> i64 {
    7
}

fn default_lookback_days() -> i64 {
    1
}

impl ImportConfig {
    pub fn order_fills_window(&self) -> TimeDelta {
        TimeDelta::days(self.order_fills_window_days)
    }

    pub fn positions_lookback(&self) -> TimeDelta {
        TimeDelta::days(self.positions_lookback_days)
    }

    pub fn fundings_lookback(&self) -> TimeDelta {
        TimeDelta::days(self.fundings_lookback_days)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            order_fills_window_days: default_order_fills_window_days(),
            positions_lookback_days: default_lookback_days(),
            fundings_lookback_days: default_lookback_days(),
        }
    }
}

/// API credentials of one dYdX wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DydxCredentials {
    pub key: String,
    pub secret: String,
    pub passphrase: String,
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DydxConfig {
    #[serde(default = "default_dydx_base_url")]
    pub base_url: String,
    /// Keyed by wallet address
    #[serde(default)]
    pub credentials: HashMap<String, DydxCredentials>,
    #[serde(default = "default_dydx_page_limit")]
    pub page_limit: usize,
    #[serde(default = "default_dydx_fill_pages")]
    pub fill_pages: usize,
    #[serde(default = "default_dydx_pages")]
    pub order_pages: usize,
    #[serde(default = "default_dydx_pages")]
    pub position_pages: usize,
    #[serde(default = "default_dydx_pages")]
    pub funding_pages: usize,
}

fn default_dydx_base_url() -> String {
    "https://api.dydx.exchange".to_string()
}

fn default_dydx_page_limit() -> usize {
    100
}

fn default_dydx_fill_pages() -> usize {
    2
}

fn default_dydx_pages() -> usize {
    10
}

impl Default for DydxConfig {
    fn default() -> Self {
        Self {
            base_url: default_dydx_base_url(),
            credentials: HashMap::new(),
            page_limit: default_dydx_page_limit(),
            fill_pages: default_dydx_fill_pages(),
            order_pages: default_dydx_pages(),
            position_pages: default_dydx_pages(),
            funding_pages: default_dydx_pages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HyperliquidConfig {
    #[serde(default = "default_hyperliquid_base_url")]
    pub base_url: String,
    /// Upper bound on `userFunding` pages followed per call
    #[serde(default = "default_hyperliquid_page_limit")]
    pub page_limit: usize,
}

fn default_hyperliquid_base_url() -> String {
    "https://api.hyperliquid.xyz".to_string()
}

fn default_hyperliquid_page_limit() -> usize {
    50
}

impl Default for HyperliquidConfig {
    fn default() -> Self {
        Self {
            base_url: default_hyperliquid_base_url(),
            page_limit: default_hyperliquid_page_limit(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the store snapshot lives; `None` keeps everything in memory
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    3600
}

impl SchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_interval_secs(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    Io { path: String, error: String },
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(f, "Failed to read config file '{}': {}", path, error)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
