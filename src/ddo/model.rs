//! Serde model of an asset's metadata document.
//!
//! Fields the SDK does not interpret (stats, purgatory, provider-specific
//! extensions) are kept in `extra` so a document survives a read/write cycle.

use super::DdoError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::path::Path;

pub const DDO_VERSION: &str = "4.1.0";
pub const DID_CONTEXT: &str = "https://w3id.org/did/v1";

pub mod service_types {
    pub const ACCESS: &str = "access";
    pub const COMPUTE: &str = "compute";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ddo {
    #[serde(rename = "@context", default = "default_context")]
    pub context: Vec<String>,
    pub id: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub chain_id: u64,
    #[serde(default)]
    pub nft_address: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default, skip_serializing_if = "Credentials::is_empty")]
    pub credentials: Credentials,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nft: Option<NftInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datatokens: Vec<DatatokenInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_context() -> Vec<String> {
    vec![DID_CONTEXT.to_string()]
}

fn default_version() -> String {
    DDO_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created: String,
    pub updated: String,
    pub description: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub author: String,
    pub license: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    /// Encrypted file list, as returned by the provider's encrypt endpoint
    #[serde(default)]
    pub files: String,
    pub datatoken_address: String,
    pub service_endpoint: String,
    #[serde(default)]
    pub timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Allow/deny lists gating who may consume the asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<CredentialEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<CredentialEntry>,
}

impl Credentials {
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialEntry {
    #[serde(rename = "type")]
    pub credential_type: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_listed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_retired: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_order_disabled: Option<bool>,
}

/// NFT section filled in by the indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub owner: String,
    #[serde(default)]
    pub state: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(rename = "tokenURI", default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatatokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub service_id: String,
}

/// Transaction that last set the document on chain, as seen by the indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    pub tx: String,
    #[serde(default)]
    pub block: u64,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub contract: String,
    #[serde(default)]
    pub datetime: String,
}

impl Ddo {
    pub fn new(
        did: String,
        chain_id: u64,
        nft_address: String,
        metadata: Metadata,
        services: Vec<Service>,
    ) -> Self {
        Self {
            context: default_context(),
            id: did,
            version: default_version(),
            chain_id,
            nft_address,
            metadata,
            services,
            credentials: Credentials::default(),
            status: None,
            nft: None,
            datatokens: Vec::new(),
            event: None,
            extra: Map::new(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, DdoError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_value(value: Value) -> Result<Self, DdoError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DdoError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, DdoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_value(&self) -> Result<Value, DdoError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Hex sha256 of the document's canonical form.
    pub fn checksum(&self) -> Result<String, DdoError> {
        checksum(&self.to_json_value()?)
    }

    pub fn get_service_by_id(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn get_service_by_index(&self, index: usize) -> Option<&Service> {
        self.services.get(index)
    }

    pub fn get_first_service_by_type(&self, service_type: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.service_type == service_type)
    }

    /// Position of `service` in the document, which is the index passed to
    /// `startOrder`.
    pub fn get_index_of_service(&self, service: &Service) -> Option<usize> {
        self.services.iter().position(|s| s.id == service.id)
    }

    pub fn add_service(&mut self, service: Service) {
        self.services.push(service);
    }
}

/// Hex sha256 of `value` serialized with sorted keys and no whitespace.
pub fn checksum(value: &Value) -> Result<String, DdoError> {
    // serde_json's Map is ordered by key unless `preserve_order` is enabled
    let canonical = serde_json::to_string(value)?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}
