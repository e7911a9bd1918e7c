use crate::contracts;
use crate::errors::SdkError;
use crate::models::tx;
use ethers::providers::Middleware;
use ethers::types::{Address, U256};
use std::sync::Arc;

/// Side-staking bot that provides the datatoken side of pool liquidity and
/// vests datatokens to the publisher.
pub struct SideStaking<M> {
    contract: contracts::SideStaking<M>,
}

impl<M: Middleware + 'static> SideStaking<M> {
    pub const CONTRACT_NAME: &'static str = "Staking";

    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: contracts::SideStaking::new(address, client),
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub async fn get_vesting_amount(&self, datatoken: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.get_vesting_amount(datatoken)).await
    }

    pub async fn get_vesting_end_block(&self, datatoken: Address) -> Result<U256, SdkError> {
        let call = self
            .contract
            .method::<_, U256>("getvestingEndBlock", datatoken)?;
        tx::read(call).await
    }

    pub async fn get_datatoken_circulating_supply(
        &self,
        datatoken: Address,
    ) -> Result<U256, SdkError> {
        tx::read(self.contract.get_datatoken_circulating_supply(datatoken)).await
    }

    pub async fn get_base_token_balance(&self, datatoken: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.get_base_token_balance(datatoken)).await
    }

    pub async fn get_pool_address(&self, datatoken: Address) -> Result<Address, SdkError> {
        tx::read(self.contract.get_pool_address(datatoken)).await
    }
}
