//! Deployed contract addresses, read from the JSON address file written by
//! the deployment scripts: `{ "<network>": { "<ContractName>": "0x..." } }`.
//!
//! Entries that are not addresses (e.g. `"chainId": 8996`) are ignored.

use crate::types::conversions::string_to_address;
use ethers::types::Address;
use log::warn;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("cannot read address file: {0}")]
    Io(#[from] std::io::Error),
    #[error("address file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("network {0} not found in address file")]
    UnknownNetwork(String),
    #[error("no address for {name} on {network}")]
    Missing { network: String, name: String },
}

#[derive(Debug, Clone, Default)]
pub struct ContractAddresses {
    networks: HashMap<String, HashMap<String, Address>>,
}

impl ContractAddresses {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AddressError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, AddressError> {
        let raw: HashMap<String, HashMap<String, Value>> = serde_json::from_str(text)?;
        let mut networks = HashMap::with_capacity(raw.len());

        for (network, entries) in raw {
            let mut contracts = HashMap::new();
            for (name, value) in entries {
                let Some(text) = value.as_str() else { continue };
                match string_to_address(text) {
                    Ok(address) => {
                        contracts.insert(name, address);
                    }
                    Err(e) => warn!("⚠️ Skipping {}.{}: {}", network, name, e),
                }
            }
            networks.insert(network, contracts);
        }

        Ok(Self { networks })
    }

    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn for_network(&self, network: &str) -> Result<&HashMap<String, Address>, AddressError> {
        self.networks
            .get(network)
            .ok_or_else(|| AddressError::UnknownNetwork(network.to_string()))
    }

    pub fn address_of(&self, network: &str, name: &str) -> Result<Address, AddressError> {
        self.for_network(network)?
            .get(name)
            .copied()
            .ok_or_else(|| AddressError::Missing {
                network: network.to_string(),
                name: name.to_string(),
            })
    }
}
