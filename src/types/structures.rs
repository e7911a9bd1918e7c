//! Argument and result structures for the contract wrappers.
//!
//! Several protocol functions take packed arrays (`address[]`, `uint256[]`)
//! whose positions carry meaning; these types name the positions and own
//! the packing order.

use crate::contracts::{ErcCreateData, NftCreateData};
use ethers::types::{Address, Bytes, U256};

/// Arguments of `BPool.initialize`.
#[derive(Debug, Clone)]
pub struct BPoolInitialized {
    pub controller: Address,
    pub factory: Address,
    /// `[lp swap fee, publish market swap fee]`
    pub swap_fees: Vec<U256>,
    pub public_swap: bool,
    pub finalized: bool,
    /// `[datatoken, base token]`
    pub tokens: [Address; 2],
    /// `[opc collector, publish market collector]`
    pub fee_collectors: [Address; 2],
}

/// Result of `getAmountInExactOut` / `getAmountOutExactIn`.
///
/// `amount` is the token amount in (exact-out quotes) or out (exact-in quotes).
/// Every fee is denominated in the token going into the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapQuote {
    pub amount: U256,
    pub lp_fee: U256,
    pub opc_fee: U256,
    pub publish_market_fee: U256,
    pub consume_market_fee: U256,
}

impl From<(U256, U256, U256, U256, U256)> for SwapQuote {
    fn from(raw: (U256, U256, U256, U256, U256)) -> Self {
        let (amount, lp_fee, opc_fee, publish_market_fee, consume_market_fee) = raw;
        Self {
            amount,
            lp_fee,
            opc_fee,
            publish_market_fee,
            consume_market_fee,
        }
    }
}

/// Trade an exact `token_amount_in` for at least `min_amount_out`.
#[derive(Debug, Clone)]
pub struct SwapExactIn {
    pub token_in: Address,
    pub token_out: Address,
    pub consume_market_fee_address: Address,
    pub token_amount_in: U256,
    pub min_amount_out: U256,
    pub max_price: U256,
    pub consume_market_swap_fee: U256,
}

impl SwapExactIn {
    pub fn packed(&self) -> ([Address; 3], [U256; 4]) {
        (
            [self.token_in, self.token_out, self.consume_market_fee_address],
            [
                self.token_amount_in,
                self.min_amount_out,
                self.max_price,
                self.consume_market_swap_fee,
            ],
        )
    }
}

/// Receive an exact `token_amount_out`, paying at most `max_amount_in`.
#[derive(Debug, Clone)]
pub struct SwapExactOut {
    pub token_in: Address,
    pub token_out: Address,
    pub consume_market_fee_address: Address,
    pub max_amount_in: U256,
    pub token_amount_out: U256,
    pub max_price: U256,
    pub consume_market_swap_fee: U256,
}

impl SwapExactOut {
    pub fn packed(&self) -> ([Address; 3], [U256; 4]) {
        (
            [self.token_in, self.token_out, self.consume_market_fee_address],
            [
                self.max_amount_in,
                self.token_amount_out,
                self.max_price,
                self.consume_market_swap_fee,
            ],
        )
    }
}

/// Arguments of the datatoken's `deployPool`.
#[derive(Debug, Clone)]
pub struct PoolDeployment {
    pub rate: U256,
    pub base_token_decimals: u8,
    pub vesting_amount: U256,
    pub vesting_blocks: U256,
    pub base_token_amount: U256,
    pub lp_swap_fee: U256,
    pub publish_market_swap_fee: U256,
    pub ss_contract: Address,
    pub base_token: Address,
    pub base_token_sender: Address,
    pub publisher: Address,
    pub publish_market_swap_fee_collector: Address,
    pub pool_template: Address,
}

impl PoolDeployment {
    pub fn ss_params(&self) -> Vec<U256> {
        vec![
            self.rate,
            U256::from(self.base_token_decimals),
            self.vesting_amount,
            self.vesting_blocks,
            self.base_token_amount,
        ]
    }

    pub fn swap_fees(&self) -> Vec<U256> {
        vec![self.lp_swap_fee, self.publish_market_swap_fee]
    }

    pub fn addresses(&self) -> Vec<Address> {
        vec![
            self.ss_contract,
            self.base_token,
            self.base_token_sender,
            self.publisher,
            self.publish_market_swap_fee_collector,
            self.pool_template,
        ]
    }
}

/// Arguments of the datatoken's `createFixedRate`.
#[derive(Debug, Clone)]
pub struct FixedRateDeployment {
    pub fixed_price_address: Address,
    pub base_token: Address,
    pub owner: Address,
    pub publish_market_swap_fee_collector: Address,
    /// Zero address lets anyone swap
    pub allowed_swapper: Address,
    pub base_token_decimals: u8,
    pub datatoken_decimals: u8,
    pub fixed_rate: U256,
    pub publish_market_swap_fee: U256,
    pub with_mint: bool,
}

impl FixedRateDeployment {
    pub fn addresses(&self) -> Vec<Address> {
        vec![
            self.base_token,
            self.owner,
            self.publish_market_swap_fee_collector,
            self.allowed_swapper,
        ]
    }

    pub fn uints(&self) -> Vec<U256> {
        vec![
            U256::from(self.base_token_decimals),
            U256::from(self.datatoken_decimals),
            self.fixed_rate,
            self.publish_market_swap_fee,
            U256::from(self.with_mint as u8),
        ]
    }
}

/// A datatoken to create on a data NFT.
#[derive(Debug, Clone)]
pub struct DatatokenParams {
    pub template_index: U256,
    pub name: String,
    pub symbol: String,
    pub minter: Address,
    pub fee_manager: Address,
    pub publish_market_order_fee_address: Address,
    pub publish_market_order_fee_token: Address,
    /// Ignored by the current template, which always uses the maximum cap
    pub cap: U256,
    pub publish_market_order_fee_amount: U256,
    pub bytess: Vec<Bytes>,
}

impl DatatokenParams {
    /// Template 1 datatoken minted and fee-managed by `publisher`, no order fee.
    pub fn simple(name: &str, symbol: &str, publisher: Address, cap: U256) -> Self {
        Self {
            template_index: U256::one(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            minter: publisher,
            fee_manager: publisher,
            publish_market_order_fee_address: Address::zero(),
            publish_market_order_fee_token: Address::zero(),
            cap,
            publish_market_order_fee_amount: U256::zero(),
            bytess: vec![Bytes::default()],
        }
    }

    pub fn strings(&self) -> Vec<String> {
        vec![self.name.clone(), self.symbol.clone()]
    }

    pub fn addresses(&self) -> Vec<Address> {
        vec![
            self.minter,
            self.fee_manager,
            self.publish_market_order_fee_address,
            self.publish_market_order_fee_token,
        ]
    }

    pub fn uints(&self) -> Vec<U256> {
        vec![self.cap, self.publish_market_order_fee_amount]
    }
}

impl From<&DatatokenParams> for ErcCreateData {
    fn from(p: &DatatokenParams) -> Self {
        ErcCreateData {
            template_index: p.template_index,
            strings: p.strings(),
            addresses: p.addresses(),
            uints: p.uints(),
            bytess: p.bytess.clone(),
        }
    }
}

/// A data NFT to deploy through the factory.
#[derive(Debug, Clone)]
pub struct NftParams {
    pub name: String,
    pub symbol: String,
    pub template_index: U256,
    pub token_uri: String,
    pub transferable: bool,
    pub owner: Address,
    pub additional_erc20_deployer: Address,
    pub additional_metadata_updater: Address,
}

impl NftParams {
    pub fn new(name: &str, symbol: &str, owner: Address) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            template_index: U256::one(),
            token_uri: String::new(),
            transferable: true,
            owner,
            additional_erc20_deployer: Address::zero(),
            additional_metadata_updater: Address::zero(),
        }
    }
}

impl From<&NftParams> for NftCreateData {
    fn from(p: &NftParams) -> Self {
        NftCreateData {
            name: p.name.clone(),
            symbol: p.symbol.clone(),
            template_index: p.template_index,
            token_uri: p.token_uri.clone(),
            transferable: p.transferable,
            owner: p.owner,
        }
    }
}

/// Minter / payment-manager roles of an address on a datatoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    pub minter: bool,
    pub payment_manager: bool,
}

/// Order fee configured by the publishing market on a datatoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishingMarketFee {
    pub collector: Address,
    pub token: Address,
    pub amount: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_arguments_pack_in_contract_order() {
        let (tin, tout, market) = (Address::random(), Address::random(), Address::random());
        let swap = SwapExactIn {
            token_in: tin,
            token_out: tout,
            consume_market_fee_address: market,
            token_amount_in: U256::from(10),
            min_amount_out: U256::from(9),
            max_price: U256::from(2),
            consume_market_swap_fee: U256::from(1),
        };
        let (addresses, amounts) = swap.packed();
        assert_eq!(addresses, [tin, tout, market]);
        assert_eq!(
            amounts,
            [U256::from(10), U256::from(9), U256::from(2), U256::from(1)]
        );

        let swap_out = SwapExactOut {
            token_in: tin,
            token_out: tout,
            consume_market_fee_address: market,
            max_amount_in: U256::from(11),
            token_amount_out: U256::from(5),
            max_price: U256::from(3),
            consume_market_swap_fee: U256::zero(),
        };
        let (_, amounts) = swap_out.packed();
        assert_eq!(amounts[0], U256::from(11));
        assert_eq!(amounts[1], U256::from(5));
    }

    #[test]
    fn pool_deployment_packs_params() {
        let ss = Address::random();
        let template = Address::random();
        let deployment = PoolDeployment {
            rate: U256::exp10(18),
            base_token_decimals: 6,
            vesting_amount: U256::from(1000),
            vesting_blocks: U256::from(2_500_000u64),
            base_token_amount: U256::from(1000),
            lp_swap_fee: U256::from(1),
            publish_market_swap_fee: U256::from(2),
            ss_contract: ss,
            base_token: Address::random(),
            base_token_sender: Address::random(),
            publisher: Address::random(),
            publish_market_swap_fee_collector: Address::random(),
            pool_template: template,
        };
        let params = deployment.ss_params();
        assert_eq!(params.len(), 5);
        assert_eq!(params[1], U256::from(6u8));
        assert_eq!(deployment.swap_fees(), vec![U256::from(1), U256::from(2)]);
        let addresses = deployment.addresses();
        assert_eq!(addresses.first(), Some(&ss));
        assert_eq!(addresses.last(), Some(&template));
    }

    #[test]
    fn fixed_rate_with_mint_flag_is_last_uint() {
        let deployment = FixedRateDeployment {
            fixed_price_address: Address::random(),
            base_token: Address::random(),
            owner: Address::random(),
            publish_market_swap_fee_collector: Address::random(),
            allowed_swapper: Address::zero(),
            base_token_decimals: 18,
            datatoken_decimals: 18,
            fixed_rate: U256::exp10(18),
            publish_market_swap_fee: U256::zero(),
            with_mint: true,
        };
        assert_eq!(deployment.uints().last(), Some(&U256::one()));
        assert_eq!(deployment.addresses()[3], Address::zero());
    }

    #[test]
    fn datatoken_params_convert_to_factory_tuple() {
        let publisher = Address::random();
        let params = DatatokenParams::simple("Datatoken 1", "DT1", publisher, U256::from(100));
        let tuple = ErcCreateData::from(&params);
        assert_eq!(tuple.strings, vec!["Datatoken 1".to_string(), "DT1".to_string()]);
        assert_eq!(tuple.addresses[0], publisher);
        assert_eq!(tuple.addresses[1], publisher);
        assert_eq!(tuple.uints, vec![U256::from(100), U256::zero()]);
        assert_eq!(tuple.bytess.len(), 1);
    }
}
