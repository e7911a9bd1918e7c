//! Asset publishing and discovery: ties the NFT factory, the data NFT's
//! metadata slot and the metadata index together.

use crate::aquarius::{AquariusError, AssetIndex, ValidationOutcome};
use crate::ddo::{did_from_nft, Ddo, DdoError, Metadata, Service};
use crate::errors::SdkError;
use crate::models::data_nft::{metadata_state, DataNft, MetadataUpdate};
use crate::models::NftFactory;
use crate::types::conversions::{address_to_checksum, string_to_address};
use crate::types::{DatatokenParams, NftParams};
use ethers::providers::Middleware;
use ethers::types::{Address, Bytes, TransactionReceipt};
use log::info;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

/// Metadata flags: no compression, no encryption.
const PLAIN_METADATA_FLAGS: u8 = 0;

#[derive(Debug, thiserror::Error)]
pub enum AssetsError {
    #[error(transparent)]
    Sdk(#[from] SdkError),
    #[error(transparent)]
    Index(#[from] AquariusError),
    #[error(transparent)]
    Ddo(#[from] DdoError),
    #[error("invalid asset: {0}")]
    InvalidAsset(String),
}

/// Timing used when waiting for the index to pick up a transaction.
#[derive(Debug, Clone, Copy)]
pub struct IndexWait {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for IndexWait {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(1000),
        }
    }
}

pub struct OceanAssets<M, I> {
    client: Arc<M>,
    index: I,
    factory: NftFactory<M>,
    chain_id: u64,
    decryptor_url: String,
    confirmations: usize,
    wait: IndexWait,
}

impl<M, I> OceanAssets<M, I>
where
    M: Middleware + 'static,
    I: AssetIndex,
{
    /// `decryptor_url` is the provider URL stored next to the metadata.
    pub fn new(
        client: Arc<M>,
        index: I,
        factory_address: Address,
        chain_id: u64,
        decryptor_url: impl Into<String>,
    ) -> Self {
        Self {
            factory: NftFactory::new(factory_address, client.clone()),
            client,
            index,
            chain_id,
            decryptor_url: decryptor_url.into(),
            confirmations: 1,
            wait: IndexWait::default(),
        }
    }

    pub fn with_confirmations(mut self, confirmations: usize) -> Self {
        self.factory = self.factory.with_confirmations(confirmations);
        self.confirmations = confirmations;
        self
    }

    pub fn with_index_wait(mut self, wait: IndexWait) -> Self {
        self.wait = wait;
        self
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    fn data_nft(&self, address: Address) -> DataNft<M> {
        DataNft::new(address, self.client.clone()).with_confirmations(self.confirmations)
    }

    /// Deploys a data NFT with one datatoken, publishes the document and
    /// returns it as indexed.
    ///
    /// Services without a datatoken address are bound to the new datatoken.
    pub async fn create(
        &self,
        metadata: Metadata,
        services: Vec<Service>,
        nft: &NftParams,
        datatoken: &DatatokenParams,
    ) -> Result<Ddo, AssetsError> {
        let (nft_address, datatoken_address) =
            self.factory.create_nft_with_erc20(nft, datatoken).await?;
        self.publish_new(metadata, services, nft_address, datatoken_address)
            .await
    }

    /// Same as [`create`](Self::create) on an NFT the publisher already owns.
    pub async fn create_on_nft(
        &self,
        metadata: Metadata,
        services: Vec<Service>,
        nft_address: Address,
        datatoken: &DatatokenParams,
    ) -> Result<Ddo, AssetsError> {
        let datatoken_address = self.data_nft(nft_address).create_erc20(datatoken).await?;
        self.publish_new(metadata, services, nft_address, datatoken_address)
            .await
    }

    async fn publish_new(
        &self,
        metadata: Metadata,
        mut services: Vec<Service>,
        nft_address: Address,
        datatoken_address: Address,
    ) -> Result<Ddo, AssetsError> {
        if services.is_empty() {
            return Err(AssetsError::InvalidAsset(
                "an asset needs at least one service".to_string(),
            ));
        }
        bind_datatoken(&mut services, datatoken_address);

        let did = did_from_nft(nft_address, self.chain_id);
        let ddo = Ddo::new(
            did,
            self.chain_id,
            address_to_checksum(nft_address),
            metadata,
            services,
        );

        let receipt = self.publish(nft_address, &ddo).await?;
        info!("🚀 Asset {} published on NFT {:?}", ddo.id, nft_address);
        self.wait_for_receipt(&ddo.id, &receipt).await
    }

    /// Re-publishes an existing asset's document on its NFT.
    pub async fn update(&self, ddo: &Ddo) -> Result<Ddo, AssetsError> {
        let nft_address = string_to_address(&ddo.nft_address)
            .map_err(|e| AssetsError::InvalidAsset(e.to_string()))?;
        let receipt = self.publish(nft_address, ddo).await?;
        info!("🔄 Asset {} updated", ddo.id);
        self.wait_for_receipt(&ddo.id, &receipt).await
    }

    /// Stores `ddo` as plain JSON in the NFT's metadata slot.
    async fn publish(&self, nft_address: Address, ddo: &Ddo) -> Result<TransactionReceipt, AssetsError> {
        let update = metadata_update(ddo, &self.decryptor_url)?;
        Ok(self.data_nft(nft_address).set_metadata(&update).await?)
    }

    async fn wait_for_receipt(
        &self,
        did: &str,
        receipt: &TransactionReceipt,
    ) -> Result<Ddo, AssetsError> {
        let tx = format!("{:?}", receipt.transaction_hash);
        let ddo = self
            .index
            .wait_for_ddo(did, Some(&tx), self.wait.timeout, self.wait.poll_interval)
            .await?;
        Ok(ddo)
    }

    /// Changes the metadata state (e.g. to end-of-life) without touching
    /// the document.
    pub async fn set_state(&self, ddo: &Ddo, state: u8) -> Result<TransactionReceipt, AssetsError> {
        let nft_address = string_to_address(&ddo.nft_address)
            .map_err(|e| AssetsError::InvalidAsset(e.to_string()))?;
        Ok(self.data_nft(nft_address).set_metadata_state(state).await?)
    }

    pub async fn resolve(&self, did: &str) -> Result<Ddo, AssetsError> {
        Ok(self.index.resolve(did).await?)
    }

    pub async fn search(&self, text: &str, size: usize) -> Result<Vec<Ddo>, AssetsError> {
        Ok(self.index.text_search(text, size).await?)
    }

    pub async fn owner_assets(&self, owner: Address, size: usize) -> Result<Vec<Ddo>, AssetsError> {
        let owner = address_to_checksum(owner);
        Ok(self.index.assets_by_owner(&owner, size).await?)
    }

    /// Current owner of the asset's data NFT, read from chain.
    pub async fn owner(&self, did: &str) -> Result<Address, AssetsError> {
        let ddo = self.resolve(did).await?;
        let nft_address = string_to_address(&ddo.nft_address)
            .map_err(|e| AssetsError::InvalidAsset(e.to_string()))?;
        Ok(self.data_nft(nft_address).owner_of().await?)
    }

    pub async fn validate(&self, ddo: &Ddo) -> Result<ValidationOutcome, AssetsError> {
        Ok(self.index.validate(ddo).await?)
    }
}

/// Points every service without a datatoken at `datatoken`.
pub fn bind_datatoken(services: &mut [Service], datatoken: Address) {
    let datatoken = address_to_checksum(datatoken);
    for service in services.iter_mut().filter(|s| s.datatoken_address.is_empty()) {
        service.datatoken_address = datatoken.clone();
    }
}

/// `setMetaData` arguments for publishing `ddo` as active, unencrypted JSON.
/// The hash is the SHA-256 of exactly the bytes stored on chain.
pub fn metadata_update(ddo: &Ddo, decryptor_url: &str) -> Result<MetadataUpdate, DdoError> {
    let text = ddo.to_json_string()?;
    let mut data_hash = [0u8; 32];
    data_hash.copy_from_slice(&Sha256::digest(text.as_bytes()));
    Ok(MetadataUpdate {
        state: metadata_state::ACTIVE,
        decryptor_url: decryptor_url.to_string(),
        decryptor_address: String::new(),
        flags: Bytes::from(vec![PLAIN_METADATA_FLAGS]),
        data: Bytes::from(text.into_bytes()),
        data_hash,
        proofs: Vec::new(),
    })
}
