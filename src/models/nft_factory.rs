use crate::contracts::nft_factory::{
    CREATE_NFT_WITH_ERC20, DEPLOY_ERC721, GET_CURRENT_NFT_COUNT, NFT_CREATED_SIGNATURE,
};
use crate::contracts::{self, ErcCreateData, NftCreateData, TokenCreatedFilter};
use crate::errors::SdkError;
use crate::models::tx;
use crate::types::{DatatokenParams, NftParams};
use ethers::providers::Middleware;
use ethers::types::{Address, TransactionReceipt, U256};
use log::info;
use std::sync::Arc;

/// ERC721 factory deploying data NFTs (and their first datatoken).
pub struct NftFactory<M> {
    contract: contracts::NftFactory<M>,
    confirmations: usize,
}

impl<M: Middleware + 'static> NftFactory<M> {
    pub const CONTRACT_NAME: &'static str = "ERC721Factory";

    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: contracts::NftFactory::new(address, client),
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

    pub async fn get_current_nft_count(&self) -> Result<U256, SdkError> {
        let call = self.contract.method::<_, U256>(GET_CURRENT_NFT_COUNT, ())?;
        tx::read(call).await
    }

    pub async fn get_current_token_count(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_current_token_count()).await
    }

    /// Deploys a data NFT and returns its address.
    pub async fn deploy_erc721(&self, params: &NftParams) -> Result<Address, SdkError> {
        let call = self.contract.method::<_, Address>(
            DEPLOY_ERC721,
            (
                params.name.clone(),
                params.symbol.clone(),
                params.template_index,
                params.additional_erc20_deployer,
                params.additional_metadata_updater,
                params.token_uri.clone(),
                params.transferable,
                params.owner,
            ),
        )?;
        let receipt = tx::send(call, self.confirmations).await?;
        let nft = Self::nft_from_receipt(&receipt)?;
        info!("✅ Data NFT {} deployed at {:?}", params.symbol, nft);
        Ok(nft)
    }

    /// Deploys a data NFT with one datatoken in a single transaction.
    /// Returns `(nft, datatoken)`.
    pub async fn create_nft_with_erc20(
        &self,
        nft: &NftParams,
        datatoken: &DatatokenParams,
    ) -> Result<(Address, Address), SdkError> {
        let call = self.contract.method::<_, (Address, Address)>(
            CREATE_NFT_WITH_ERC20,
            (NftCreateData::from(nft), ErcCreateData::from(datatoken)),
        )?;
        let receipt = tx::send(call, self.confirmations).await?;
        let nft_address = Self::nft_from_receipt(&receipt)?;
        let token: TokenCreatedFilter = tx::first_event(&receipt, "TokenCreated")?;
        info!(
            "✅ Data NFT {:?} deployed with datatoken {:?}",
            nft_address, token.new_token_address
        );
        Ok((nft_address, token.new_token_address))
    }

    fn nft_from_receipt(receipt: &TransactionReceipt) -> Result<Address, SdkError> {
        tx::indexed_address(receipt, NFT_CREATED_SIGNATURE, 0).ok_or(SdkError::MissingEvent {
            event: "NFTCreated",
            tx_hash: receipt.transaction_hash,
        })
    }

    pub fn token_created_events(receipt: &TransactionReceipt) -> Vec<TokenCreatedFilter> {
        tx::events_from_receipt(receipt)
    }
}
