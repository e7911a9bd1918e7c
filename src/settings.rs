use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::env;

pub const DEFAULT_CONFIG_FILE: &str = "Config.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Network {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Key into the address file
    #[serde(default = "default_network_name")]
    pub name: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}
fn default_chain_id() -> u64 {
    8996 // local development chain
}
fn default_network_name() -> String {
    "development".to_string()
}
fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for Network {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            name: default_network_name(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Contracts {
    /// JSON file mapping network -> contract name -> address
    #[serde(default)]
    pub address_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetadataSettings {
    #[serde(default = "default_aquarius_url")]
    pub aquarius_url: String,
    #[serde(default = "default_provider_url")]
    pub provider_url: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_wait_timeout_seconds")]
    pub wait_timeout_seconds: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_aquarius_url() -> String {
    "http://172.15.0.5:5000".to_string()
}
fn default_provider_url() -> String {
    "http://172.15.0.4:8030".to_string()
}
fn default_request_timeout_seconds() -> u64 {
    10
}
fn default_wait_timeout_seconds() -> u64 {
    60
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            aquarius_url: default_aquarius_url(),
            provider_url: default_provider_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            wait_timeout_seconds: default_wait_timeout_seconds(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Transactions {
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
    #[serde(default)]
    pub default_gas_limit: Option<u64>,
}

fn default_confirmations() -> usize {
    1
}

impl Default for Transactions {
    fn default() -> Self {
        Self {
            confirmations: default_confirmations(),
            default_gas_limit: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub contracts: Contracts,
    #[serde(default)]
    pub metadata: MetadataSettings,
    #[serde(default)]
    pub transactions: Transactions,
    #[serde(default = "default_downloads_path")]
    pub downloads_path: String,
    /// Only ever read from the environment
    #[serde(skip)]
    pub private_key: Option<String>,
}

fn default_downloads_path() -> String {
    "consume-downloads/".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: Network::default(),
            contracts: Contracts::default(),
            metadata: MetadataSettings::default(),
            transactions: Transactions::default(),
            downloads_path: default_downloads_path(),
            private_key: None,
        }
    }
}

impl Settings {
    /// Loads `Config.toml` from the working directory when present.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    // Environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env("OCEAN_SDK_RPC_URL") {
            self.network.rpc_url = url;
        }
        if let Some(raw) = non_empty_env("OCEAN_SDK_CHAIN_ID") {
            match raw.parse() {
                Ok(id) => self.network.chain_id = id,
                Err(e) => log::warn!("⚠️ Ignoring OCEAN_SDK_CHAIN_ID={}: {}", raw, e),
            }
        }
        if let Some(name) = non_empty_env("OCEAN_SDK_NETWORK") {
            self.network.name = name;
        }
        if let Some(url) = non_empty_env("OCEAN_SDK_AQUARIUS_URL") {
            self.metadata.aquarius_url = url;
        }
        if let Some(url) = non_empty_env("OCEAN_SDK_PROVIDER_URL") {
            self.metadata.provider_url = url;
        }
        if let Some(file) = non_empty_env("OCEAN_SDK_ADDRESS_FILE") {
            self.contracts.address_file = Some(file);
        }
        if let Some(key) = non_empty_env("OCEAN_SDK_PRIVATE_KEY") {
            self.private_key = Some(key);
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
