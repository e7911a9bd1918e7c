use crate::contracts::datatoken::{NewPoolFilter, GET_ERC721_ADDRESS};
use crate::contracts::{
    self, ConsumeMarketFee, NewFixedRateFilter, OrderStartedFilter, ProviderFee,
};
use crate::errors::SdkError;
use crate::models::erc20::Erc20Token;
use crate::models::tx;
use crate::types::{FixedRateDeployment, Permissions, PoolDeployment, PublishingMarketFee};
use ethers::providers::Middleware;
use ethers::types::{Address, Bytes, TransactionReceipt, H256, U256};
use log::info;
use serde::Deserialize;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

/// Datatoken: an ERC20 minted against a data NFT, used to pay for access.
///
/// Plain ERC20 reads and writes are reachable through `Deref`.
pub struct Datatoken<M> {
    token: Erc20Token<M>,
    contract: contracts::DatatokenTemplate<M>,
    confirmations: usize,
}

impl<M> Deref for Datatoken<M> {
    type Target = Erc20Token<M>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

/// Pool created by `deployPool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedPool {
    pub pool: Address,
    pub ss_contract: Address,
    pub base_token: Address,
}

/// Exchange created by `createFixedRate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedExchange {
    pub exchange_id: [u8; 32],
    pub exchange_contract: Address,
}

impl<M: Middleware + 'static> Datatoken<M> {
    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            token: Erc20Token::new(address, client.clone()),
            contract: contracts::DatatokenTemplate::new(address, client),
            confirmations: 1,
        }
    }

    pub fn with_confirmations(mut self, confirmations: usize) -> Self {
        self.token = self.token.with_confirmations(confirmations);
        self.confirmations = confirmations;
        self
    }

    pub async fn mint(&self, account: Address, amount: U256) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.mint(account, amount), self.confirmations).await
    }

    pub async fn is_minter(&self, account: Address) -> Result<bool, SdkError> {
        tx::read(self.contract.is_minter(account)).await
    }

    pub async fn get_permissions(&self, user: Address) -> Result<Permissions, SdkError> {
        let (minter, payment_manager) = tx::read(self.contract.get_permissions(user)).await?;
        Ok(Permissions {
            minter,
            payment_manager,
        })
    }

    pub async fn get_publishing_market_fee(&self) -> Result<PublishingMarketFee, SdkError> {
        let (collector, token, amount) =
            tx::read(self.contract.get_publishing_market_fee()).await?;
        Ok(PublishingMarketFee {
            collector,
            token,
            amount,
        })
    }

    /// Data NFT this datatoken belongs to.
    pub async fn nft_address(&self) -> Result<Address, SdkError> {
        let call = self.contract.method::<_, Address>(GET_ERC721_ADDRESS, ())?;
        tx::read(call).await
    }

    /// Deploys a pool for this datatoken through the router. The base token
    /// amount must be approved for the router beforehand.
    pub async fn deploy_pool(&self, params: &PoolDeployment) -> Result<DeployedPool, SdkError> {
        let call = self
            .contract
            .deploy_pool(params.ss_params(), params.swap_fees(), params.addresses());
        let receipt = tx::send(call, self.confirmations).await?;
        let event: NewPoolFilter = tx::first_event(&receipt, "NewPool")?;
        info!("🏊 Pool {:?} deployed for datatoken {:?}", event.pool_address, self.address());
        Ok(DeployedPool {
            pool: event.pool_address,
            ss_contract: event.ss_contract,
            base_token: event.base_token_address,
        })
    }

    pub async fn create_fixed_rate(
        &self,
        params: &FixedRateDeployment,
    ) -> Result<DeployedExchange, SdkError> {
        let call = self.contract.create_fixed_rate(
            params.fixed_price_address,
            params.addresses(),
            params.uints(),
        );
        let receipt = tx::send(call, self.confirmations).await?;
        let event: NewFixedRateFilter = tx::first_event(&receipt, "NewFixedRate")?;
        Ok(DeployedExchange {
            exchange_id: event.exchange_id,
            exchange_contract: event.exchange_contract,
        })
    }

    /// Starts an order: spends one datatoken and pays the provider and
    /// consume-market fees.
    pub async fn start_order(
        &self,
        consumer: Address,
        service_index: U256,
        provider_fee: ProviderFee,
        consume_market_fee: ConsumeMarketFee,
    ) -> Result<TransactionReceipt, SdkError> {
        let call =
            self.contract
                .start_order(consumer, service_index, provider_fee, consume_market_fee);
        tx::send(call, self.confirmations).await
    }

    pub fn order_started_events(receipt: &TransactionReceipt) -> Vec<OrderStartedFilter> {
        tx::events_from_receipt(receipt)
    }
}

/// `providerFee` object returned by a provider's `initialize` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFeeResponse {
    pub provider_fee_address: String,
    pub provider_fee_token: String,
    pub provider_fee_amount: serde_json::Value,
    pub v: u8,
    pub r: String,
    pub s: String,
    pub valid_until: serde_json::Value,
    #[serde(default)]
    pub provider_data: String,
}

impl TryFrom<&ProviderFeeResponse> for ProviderFee {
    type Error = SdkError;

    fn try_from(resp: &ProviderFeeResponse) -> Result<Self, Self::Error> {
        Ok(ProviderFee {
            provider_fee_address: parse_address(&resp.provider_fee_address)?,
            provider_fee_token: parse_address(&resp.provider_fee_token)?,
            provider_fee_amount: json_u256(&resp.provider_fee_amount)?,
            v: resp.v,
            r: parse_h256(&resp.r)?.0,
            s: parse_h256(&resp.s)?.0,
            valid_until: json_u256(&resp.valid_until)?,
            provider_data: hex_or_text_bytes(&resp.provider_data),
        })
    }
}

fn parse_address(s: &str) -> Result<Address, SdkError> {
    Address::from_str(s).map_err(|e| SdkError::InvalidArgument(format!("address {}: {}", s, e)))
}

fn parse_h256(s: &str) -> Result<H256, SdkError> {
    H256::from_str(s).map_err(|e| SdkError::InvalidArgument(format!("bytes32 {}: {}", s, e)))
}

/// Accepts JSON numbers and decimal or 0x-hex strings.
fn json_u256(value: &serde_json::Value) -> Result<U256, SdkError> {
    let invalid = || SdkError::InvalidArgument(format!("not an unsigned integer: {}", value));
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(U256::from).ok_or_else(invalid),
        serde_json::Value::String(s) if s.starts_with("0x") => {
            U256::from_str_radix(&s[2..], 16).map_err(|_| invalid())
        }
        serde_json::Value::String(s) => U256::from_dec_str(s).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn hex_or_text_bytes(s: &str) -> Bytes {
    match s.strip_prefix("0x").map(hex::decode) {
        Some(Ok(raw)) => Bytes::from(raw),
        _ => Bytes::from(s.as_bytes().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_fee_response_converts() {
        let json = serde_json::json!({
            "providerFeeAddress": "0x00bd138abd70e2f00903268f3db08f2d25677c9e",
            "providerFeeToken": "0x0000000000000000000000000000000000000000",
            "providerFeeAmount": "0",
            "providerData": "0x7b7d",
            "v": 27,
            "r": "0x3c53a86ce6d5b8c1d9e08e1a85d1c2a5c3b9a5e0a93c9c9c5f5c11a1c0f0d0e0",
            "s": "0x0c53a86ce6d5b8c1d9e08e1a85d1c2a5c3b9a5e0a93c9c9c5f5c11a1c0f0d0e1",
            "validUntil": 1700000000
        });
        let resp: ProviderFeeResponse = serde_json::from_value(json).unwrap();
        let fee = ProviderFee::try_from(&resp).unwrap();
        assert_eq!(fee.v, 27);
        assert_eq!(fee.provider_fee_amount, U256::zero());
        assert_eq!(fee.valid_until, U256::from(1_700_000_000u64));
        assert_eq!(fee.provider_data, Bytes::from(b"{}".to_vec()));
        assert_eq!(fee.s[31], 0xe1);
    }

    #[test]
    fn json_u256_accepts_numbers_and_strings() {
        assert_eq!(json_u256(&serde_json::json!(5)).unwrap(), U256::from(5));
        assert_eq!(json_u256(&serde_json::json!("0x10")).unwrap(), U256::from(16));
        assert_eq!(
            json_u256(&serde_json::json!("1000000000000000000000")).unwrap(),
            U256::exp10(21)
        );
        assert!(json_u256(&serde_json::json!(-1)).is_err());
        assert!(json_u256(&serde_json::json!(null)).is_err());
    }
}
