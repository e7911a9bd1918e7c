use crate::contracts::{self, erc20::TransferFilter};
use crate::errors::SdkError;
use crate::models::tx;
use ethers::providers::Middleware;
use ethers::types::{Address, TransactionReceipt, U256};
use std::sync::Arc;

/// Plain ERC20 token (base tokens, and the ERC20 half of every datatoken).
pub struct Erc20Token<M> {
    contract: contracts::Erc20<M>,
    confirmations: usize,
}

impl<M> Clone for Erc20Token<M> {
    fn clone(&self) -> Self {
        Self {
            contract: self.contract.clone(),
            confirmations: self.confirmations,
        }
    }
}

impl<M: Middleware + 'static> Erc20Token<M> {
    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: contracts::Erc20::new(address, client),
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

    pub async fn decimals(&self) -> Result<u8, SdkError> {
        tx::read(self.contract.decimals()).await
    }

    pub async fn total_supply(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.total_supply()).await
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.balance_of(owner)).await
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.allowance(owner, spender)).await
    }

    pub async fn approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.approve(spender, amount), self.confirmations).await
    }

    pub async fn transfer(&self, to: Address, amount: U256) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.transfer(to, amount), self.confirmations).await
    }

    /// Approves `spender` only when the current allowance is below `amount`.
    pub async fn ensure_allowance(
        &self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<Option<TransactionReceipt>, SdkError> {
        if self.allowance(owner, spender).await? >= amount {
            return Ok(None);
        }
        self.approve(spender, amount).await.map(Some)
    }

    pub fn transfer_events(receipt: &TransactionReceipt) -> Vec<TransferFilter> {
        tx::events_from_receipt(receipt)
    }
}
