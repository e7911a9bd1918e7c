use crate::contracts::data_nft::{MetadataStateFilter, CREATE_ERC20};
use crate::contracts::{
    self, MetaDataProof, MetadataCreatedFilter, MetadataUpdatedFilter, TokenCreatedFilter,
};
use crate::errors::SdkError;
use crate::models::tx;
use crate::types::DatatokenParams;
use ethers::providers::Middleware;
use ethers::types::{Address, Bytes, TransactionReceipt, U256};
use log::info;
use std::sync::Arc;

/// Metadata state values understood by the indexer.
pub mod metadata_state {
    pub const ACTIVE: u8 = 0;
    pub const END_OF_LIFE: u8 = 1;
    pub const DEPRECATED: u8 = 2;
    pub const REVOKED: u8 = 3;
    pub const ORDERING_DISABLED: u8 = 4;
    pub const UNLISTED: u8 = 5;
}

/// Metadata currently stored on a data NFT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataInfo {
    pub decryptor_url: String,
    pub decryptor_address: String,
    pub state: u8,
    pub has_metadata: bool,
}

/// Arguments of `setMetaData`.
#[derive(Debug, Clone)]
pub struct MetadataUpdate {
    pub state: u8,
    pub decryptor_url: String,
    pub decryptor_address: String,
    pub flags: Bytes,
    pub data: Bytes,
    pub data_hash: [u8; 32],
    pub proofs: Vec<MetaDataProof>,
}

/// Data NFT (ERC721) owning an asset's metadata and datatokens.
pub struct DataNft<M> {
    contract: contracts::DataNftTemplate<M>,
    confirmations: usize,
}

impl<M: Middleware + 'static> DataNft<M> {
    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: contracts::DataNftTemplate::new(address, client),
            confirmations: 1,
        }
    }

    pub fn with_confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub async fn name(&self) -> Result<String, SdkError> {
        tx::read(self.contract.name()).await
    }

    pub async fn symbol(&self) -> Result<String, SdkError> {
        tx::read(self.contract.symbol()).await
    }

    /// Owner of the single token (id 1) every data NFT mints.
    pub async fn owner_of(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.owner_of(U256::one())).await
    }

    pub async fn get_metadata(&self) -> Result<MetadataInfo, SdkError> {
        let (decryptor_url, decryptor_address, state, has_metadata) =
            tx::read(self.contract.get_meta_data()).await?;
        Ok(MetadataInfo {
            decryptor_url,
            decryptor_address,
            state,
            has_metadata,
        })
    }

    pub async fn set_metadata(
        &self,
        update: &MetadataUpdate,
    ) -> Result<TransactionReceipt, SdkError> {
        let call = self.contract.set_meta_data(
            update.state,
            update.decryptor_url.clone(),
            update.decryptor_address.clone(),
            update.flags.clone(),
            update.data.clone(),
            update.data_hash,
            update.proofs.clone(),
        );
        tx::send(call, self.confirmations).await
    }

    pub async fn set_metadata_state(&self, state: u8) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.set_meta_data_state(state), self.confirmations).await
    }

    /// Creates a datatoken on this NFT and returns its address.
    pub async fn create_erc20(&self, params: &DatatokenParams) -> Result<Address, SdkError> {
        let call = self.contract.method::<_, Address>(
            CREATE_ERC20,
            (
                params.template_index,
                params.strings(),
                params.addresses(),
                params.uints(),
                params.bytess.clone(),
            ),
        )?;
        let receipt = tx::send(call, self.confirmations).await?;
        let event: TokenCreatedFilter = tx::first_event(&receipt, "TokenCreated")?;
        info!(
            "✅ Datatoken {} ({:?}) created on NFT {:?}",
            params.symbol,
            event.new_token_address,
            self.address()
        );
        Ok(event.new_token_address)
    }

    pub fn metadata_created_events(receipt: &TransactionReceipt) -> Vec<MetadataCreatedFilter> {
        tx::events_from_receipt(receipt)
    }

    pub fn metadata_updated_events(receipt: &TransactionReceipt) -> Vec<MetadataUpdatedFilter> {
        tx::events_from_receipt(receipt)
    }

    pub fn metadata_state_events(receipt: &TransactionReceipt) -> Vec<MetadataStateFilter> {
        tx::events_from_receipt(receipt)
    }
}
