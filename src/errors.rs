use crate::types::conversions::ConversionError;
use ethers::contract::ContractError;
use ethers::providers::{Middleware, ProviderError};
use ethers::types::TxHash;

/// Errors surfaced by contract wrappers.
///
/// The SDK adds no recovery policy of its own: whatever the remote node
/// reports (revert, rejected transaction, transport failure) is carried here.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("contract call failed: {message}")]
    Contract {
        message: String,
        /// Decoded `Error(string)` payload when the node returned one
        revert: Option<String>,
    },
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("transaction {0:?} was dropped from the mempool")]
    Dropped(TxHash),
    #[error("transaction {tx_hash:?} reverted")]
    Reverted { tx_hash: TxHash },
    #[error("expected event {event} not found in transaction {tx_hash:?}")]
    MissingEvent { event: &'static str, tx_hash: TxHash },
    #[error("ABI error: {0}")]
    Abi(#[from] ethers::abi::AbiError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SdkError {
    pub fn from_contract<M: Middleware>(e: ContractError<M>) -> Self {
        let revert = e.decode_revert::<String>();
        SdkError::Contract {
            message: e.to_string(),
            revert,
        }
    }

    /// Revert text if the node reported one.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            SdkError::Contract { revert, .. } => revert.as_deref(),
            _ => None,
        }
    }
}
