use crate::contracts::factory_router::NewPoolFilter;
use crate::contracts::{self, Operations, Stakes};
use crate::errors::SdkError;
use crate::models::tx;
use ethers::providers::Middleware;
use ethers::types::{Address, TransactionReceipt, U256};
use std::sync::Arc;

/// Router holding protocol-wide fee settings and the approved base tokens.
pub struct FactoryRouter<M> {
    contract: contracts::FactoryRouter<M>,
    confirmations: usize,
}

impl<M: Middleware + 'static> FactoryRouter<M> {
    pub const CONTRACT_NAME: &'static str = "Router";

    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: contracts::FactoryRouter::new(address, client),
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

    pub async fn router_owner(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.router_owner()).await
    }

    /// Address of the ERC721 factory wired to this router.
    pub async fn factory(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.factory()).await
    }

    pub async fn swap_ocean_fee(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.swap_ocean_fee()).await
    }

    pub async fn swap_non_ocean_fee(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.swap_non_ocean_fee()).await
    }

    /// Approved base tokens pay the lower community swap fee.
    pub async fn is_approved_token(&self, token: Address) -> Result<bool, SdkError> {
        tx::read(self.contract.is_approved_token(token)).await
    }

    pub async fn is_ss_contract(&self, address: Address) -> Result<bool, SdkError> {
        tx::read(self.contract.is_ss_contract(address)).await
    }

    pub async fn is_fixed_rate_contract(&self, address: Address) -> Result<bool, SdkError> {
        tx::read(self.contract.is_fixed_rate_contract(address)).await
    }

    pub async fn is_dispenser_contract(&self, address: Address) -> Result<bool, SdkError> {
        tx::read(self.contract.is_dispenser_contract(address)).await
    }

    /// Community swap fee that applies to pools using `base_token`.
    pub async fn get_opc_fee(&self, base_token: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.get_opc_fee(base_token)).await
    }

    pub async fn get_opc_consume_fee(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_opc_consume_fee()).await
    }

    pub async fn get_opc_provider_fee(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_opc_provider_fee()).await
    }

    pub async fn get_min_vesting_period(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_min_vesting_period()).await
    }

    pub async fn opc_collector(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.get_opc_collector()).await
    }

    pub async fn stake_batch(&self, stakes: Vec<Stakes>) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.stake_batch(stakes), self.confirmations).await
    }

    pub async fn buy_dt_batch(
        &self,
        operations: Vec<Operations>,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.buy_dt_batch(operations), self.confirmations).await
    }

    pub fn new_pool_events(receipt: &TransactionReceipt) -> Vec<NewPoolFilter> {
        tx::events_from_receipt(receipt)
    }
}
