use crate::contracts::{self, SwappedFilter};
use crate::errors::SdkError;
use crate::models::tx;
use ethers::providers::Middleware;
use ethers::types::{Address, TransactionReceipt, U256};
use std::sync::Arc;

/// Fee configuration of a fixed-rate exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeFees {
    pub market_fee: U256,
    pub market_fee_collector: Address,
    pub opc_fee: U256,
    pub market_fee_available: U256,
    pub ocean_fee_available: U256,
}

/// Base token amount (in or out) for a datatoken amount, with its fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExchangeQuote {
    pub base_token_amount: U256,
    pub ocean_fee_amount: U256,
    pub publish_market_fee_amount: U256,
    pub consume_market_fee_amount: U256,
}

impl From<(U256, U256, U256, U256)> for ExchangeQuote {
    fn from(raw: (U256, U256, U256, U256)) -> Self {
        Self {
            base_token_amount: raw.0,
            ocean_fee_amount: raw.1,
            publish_market_fee_amount: raw.2,
            consume_market_fee_amount: raw.3,
        }
    }
}

/// Fixed-rate exchange selling datatokens at a set price.
pub struct FixedRateExchange<M> {
    contract: contracts::FixedRateExchange<M>,
    confirmations: usize,
}

impl<M: Middleware + 'static> FixedRateExchange<M> {
    pub const CONTRACT_NAME: &'static str = "FixedPrice";

    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: contracts::FixedRateExchange::new(address, client),
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

    pub async fn generate_exchange_id(
        &self,
        base_token: Address,
        datatoken: Address,
    ) -> Result<[u8; 32], SdkError> {
        tx::read(self.contract.generate_exchange_id(base_token, datatoken)).await
    }

    pub async fn get_rate(&self, exchange_id: [u8; 32]) -> Result<U256, SdkError> {
        tx::read(self.contract.get_rate(exchange_id)).await
    }

    pub async fn is_active(&self, exchange_id: [u8; 32]) -> Result<bool, SdkError> {
        tx::read(self.contract.is_active(exchange_id)).await
    }

    pub async fn get_fees_info(&self, exchange_id: [u8; 32]) -> Result<ExchangeFees, SdkError> {
        let (market_fee, market_fee_collector, opc_fee, market_fee_available, ocean_fee_available) =
            tx::read(self.contract.get_fees_info(exchange_id)).await?;
        Ok(ExchangeFees {
            market_fee,
            market_fee_collector,
            opc_fee,
            market_fee_available,
            ocean_fee_available,
        })
    }

    /// Base tokens needed to buy `datatoken_amount`.
    pub async fn calc_base_in_given_out_dt(
        &self,
        exchange_id: [u8; 32],
        datatoken_amount: U256,
        consume_market_swap_fee: U256,
    ) -> Result<ExchangeQuote, SdkError> {
        let call = self.contract.calc_base_in_given_out_dt(
            exchange_id,
            datatoken_amount,
            consume_market_swap_fee,
        );
        tx::read(call).await.map(ExchangeQuote::from)
    }

    /// Base tokens received for selling `datatoken_amount`.
    pub async fn calc_base_out_given_in_dt(
        &self,
        exchange_id: [u8; 32],
        datatoken_amount: U256,
        consume_market_swap_fee: U256,
    ) -> Result<ExchangeQuote, SdkError> {
        let call = self.contract.calc_base_out_given_in_dt(
            exchange_id,
            datatoken_amount,
            consume_market_swap_fee,
        );
        tx::read(call).await.map(ExchangeQuote::from)
    }

    pub async fn buy_dt(
        &self,
        exchange_id: [u8; 32],
        datatoken_amount: U256,
        max_base_token_amount: U256,
        consume_market_address: Address,
        consume_market_swap_fee: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        let call = self.contract.buy_dt(
            exchange_id,
            datatoken_amount,
            max_base_token_amount,
            consume_market_address,
            consume_market_swap_fee,
        );
        tx::send(call, self.confirmations).await
    }

    pub async fn sell_dt(
        &self,
        exchange_id: [u8; 32],
        datatoken_amount: U256,
        min_base_token_amount: U256,
        consume_market_address: Address,
        consume_market_swap_fee: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        let call = self.contract.sell_dt(
            exchange_id,
            datatoken_amount,
            min_base_token_amount,
            consume_market_address,
            consume_market_swap_fee,
        );
        tx::send(call, self.confirmations).await
    }

    pub fn swapped_events(receipt: &TransactionReceipt) -> Vec<SwappedFilter> {
        tx::events_from_receipt(receipt)
    }
}
