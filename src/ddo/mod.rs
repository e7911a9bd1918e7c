//! Asset metadata documents (DDOs) and their identifiers.

pub mod credentials;
pub mod did;
pub mod model;

pub use credentials::{ConsumableCode, Credential, CredentialError};
pub use did::{did_from_nft, did_to_id, id_to_did, is_valid_did, DID_PREFIX};
pub use model::{
    checksum, service_types, AssetStatus, CredentialEntry, Credentials, DatatokenInfo, Ddo,
    EventInfo, Metadata, NftInfo, Service,
};

#[derive(Debug, thiserror::Error)]
pub enum DdoError {
    #[error("invalid DID: {0}")]
    InvalidDid(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}
