use railbook_catalog::{FareTable, SeatClass, DEFAULT_FARE};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::Path;
use std::time::Duration;
use crate::StoreError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub fares: FaresConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            environment: default_environment(),
            fares: FaresConfig::default(),
            submission: SubmissionConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

/// Seat fares keyed by snake_case seat class (`second_class = 553`)
#[derive(Debug, Deserialize, Clone)]
pub struct FaresConfig {
    #[serde(default = "default_prices")]
    pub prices: HashMap<String, i32>,
    #[serde(default = "default_fare")]
    pub default_fare: i32,
}

impl Default for FaresConfig {
    fn default() -> Self {
        Self {
            prices: default_prices(),
            default_fare: default_fare(),
        }
    }
}

impl FaresConfig {
    /// Build the fare table; an unknown seat class key is a config error
    pub fn to_fare_table(&self) -> Result<FareTable, StoreError> {
        let mut prices = BTreeMap::new();
        for (key, price) in &self.prices {
            let class = SeatClass::from_filter_key(key)
                .or_else(|| key.parse().ok())
                .ok_or_else(|| StoreError::UnknownSeatClass(key.clone()))?;
            prices.insert(class, *price);
        }
        Ok(FareTable::new(prices, self.default_fare))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl SubmissionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_port() -> u16 { 3000 }
fn default_api_prefix() -> String { "/api/v1".to_string() }
fn default_environment() -> String { "development".to_string() }
fn default_fare() -> i32 { DEFAULT_FARE }
fn default_timeout_seconds() -> u64 { 30 }
fn default_true() -> bool { true }

fn default_prices() -> HashMap<String, i32> {
    FareTable::default()
        .listed()
        .map(|(class, price)| (class.filter_key().to_string(), price))
        .collect()
}

impl Config {
    /// Load from `./config` and the environment. `RUN_MODE`, when set,
    /// decides `environment` over anything the config files say.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"), env::var("RUN_MODE").ok())
    }

    pub fn load_from(dir: &Path, run_mode: Option<String>) -> Result<Self, config::ConfigError> {
        let mode = run_mode.clone().unwrap_or_else(default_environment);
        let source = |name: &str| config::File::with_name(&dir.join(name).to_string_lossy()).required(false);

        let mut builder = config::Config::builder()
            .set_default("environment", mode.clone())?
            .add_source(source("default"))
            // Per-environment overrides, optional
            .add_source(source(&mode))
            // Local overrides, not checked in
            .add_source(source("local"))
            // Eg. `RAILBOOK__SERVER__PORT=8080` sets `server.port`
            .add_source(config::Environment::with_prefix("RAILBOOK").separator("__"));

        if let Some(run_mode) = run_mode {
            builder = builder.set_override("environment", run_mode)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
