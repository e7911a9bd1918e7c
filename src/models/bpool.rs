//! # BPool
//!
//! Typed wrapper over a deployed two-token weighted pool (datatoken / base
//! token). The pool contract owns every piece of state and every formula:
//! spot price, swap execution, fee collection and the bind / rebind /
//! finalize lifecycle are all computed remotely. This module only marshals
//! arguments and return values.
//!
//! ## Lifecycle
//!
//! A pool starts controlled (`bind`, `rebind`, `setSwapFee` available to the
//! controller) and becomes `finalized` through a one-way transition. A
//! finalized pool has immutable weights, balances and fees; swaps, joins and
//! exits become public and control functions revert with `ERR_IS_FINALIZED`.

use crate::contracts::{self, LogExitFilter, LogJoinFilter, LogSwapFilter, SwapFeesFilter};
use crate::errors::SdkError;
use crate::models::tx::{self, GASLIMIT_POOL_SETUP};
use crate::types::{BPoolInitialized, SwapExactIn, SwapExactOut, SwapQuote};
use ethers::providers::Middleware;
use ethers::types::{Address, TransactionReceipt, U256};
use log::debug;
use std::sync::Arc;

pub struct BPool<M> {
    contract: contracts::BPool<M>,
    confirmations: usize,
}

impl<M> Clone for BPool<M> {
    fn clone(&self) -> Self {
        Self {
            contract: self.contract.clone(),
            confirmations: self.confirmations,
        }
    }
}

impl<M: Middleware + 'static> BPool<M> {
    pub const CONTRACT_NAME: &'static str = "BPool";

    pub fn new(address: Address, client: Arc<M>) -> Self {
        Self {
            contract: contracts::BPool::new(address, client),
            confirmations: 1,
        }
    }

    /// Blocks to wait for after each transaction.
    pub fn with_confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// Raw binding, for calls this wrapper does not cover.
    pub fn contract(&self) -> &contracts::BPool<M> {
        &self.contract
    }

    // ─── Setup ────────────────────────────────────────────────────────────

    pub async fn initialize(&self, params: &BPoolInitialized) -> Result<TransactionReceipt, SdkError> {
        let call = self.contract.initialize(
            params.controller,
            params.factory,
            params.swap_fees.clone(),
            params.public_swap,
            params.finalized,
            params.tokens,
            params.fee_collectors,
        );
        tx::send(call, self.confirmations).await
    }

    /// Binds both tokens with their initial balances and weights. Sent with a
    /// fixed gas limit.
    #[allow(clippy::too_many_arguments)]
    pub async fn setup(
        &self,
        datatoken: Address,
        datatoken_amount: U256,
        datatoken_weight: U256,
        base_token: Address,
        base_token_amount: U256,
        base_token_weight: U256,
        swap_fee: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        let call = self
            .contract
            .setup(
                datatoken,
                datatoken_amount,
                datatoken_weight,
                base_token,
                base_token_amount,
                base_token_weight,
                swap_fee,
            )
            .gas(GASLIMIT_POOL_SETUP);
        tx::send(call, self.confirmations).await
    }

    // ─── State ────────────────────────────────────────────────────────────

    pub async fn is_public_pool(&self) -> Result<bool, SdkError> {
        tx::read(self.contract.is_public_swap()).await
    }

    /// True once the pool is finalized: weights, balances and fees are
    /// immutable, `SWAP`, `JOIN` and `EXIT` are public and control calls are
    /// disabled.
    pub async fn is_finalized(&self) -> Result<bool, SdkError> {
        tx::read(self.contract.is_finalized()).await
    }

    /// True if the token has a valid balance and weight in this pool.
    pub async fn is_bound(&self, token: Address) -> Result<bool, SdkError> {
        tx::read(self.contract.is_bound(token)).await
    }

    /// How many tokens are bound to this pool.
    pub async fn get_num_tokens(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_num_tokens()).await
    }

    pub async fn get_current_tokens(&self) -> Result<Vec<Address>, SdkError> {
        tx::read(self.contract.get_current_tokens()).await
    }

    /// Same as [`Self::get_current_tokens`] but reverts unless finalized.
    pub async fn get_final_tokens(&self) -> Result<Vec<Address>, SdkError> {
        tx::read(self.contract.get_final_tokens()).await
    }

    pub async fn get_denormalized_weight(&self, token: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.get_denormalized_weight(token)).await
    }

    pub async fn get_total_denormalized_weight(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_total_denormalized_weight()).await
    }

    /// Normalized weight of a token in wei units. Normalized weights of all
    /// tokens sum to 1e18, give or take a few wei of division loss.
    pub async fn get_normalized_weight(&self, token: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.get_normalized_weight(token)).await
    }

    pub async fn get_balance(&self, token: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.get_balance(token)).await
    }

    /// Address allowed to call control functions (`rebind`, `setSwapFee`, `finalize`).
    pub async fn get_controller(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.get_controller()).await
    }

    pub async fn get_datatoken_address(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.get_datatoken_address()).await
    }

    pub async fn get_base_token_address(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.get_base_token_address()).await
    }

    /// Pool shares held by `account`.
    pub async fn shares_of(&self, account: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.balance_of(account)).await
    }

    pub async fn total_shares(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.total_supply()).await
    }

    // ─── Fees ─────────────────────────────────────────────────────────────

    /// Liquidity-provider swap fee, in wei (1e18 = 100%).
    pub async fn get_swap_fee(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_swap_fee()).await
    }

    /// Publish-market swap fee, in wei.
    pub async fn get_market_fee(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_market_fee()).await
    }

    /// Community (OPC) swap fee, in wei.
    pub async fn opc_fee(&self) -> Result<U256, SdkError> {
        tx::read(self.contract.get_opc_fee()).await
    }

    /// Community fees accrued in `token` and not yet collected.
    pub async fn community_fee(&self, token: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.community_fees(token)).await
    }

    /// Publish-market fees accrued in `token` and not yet collected.
    pub async fn publish_market_fee(&self, token: Address) -> Result<U256, SdkError> {
        tx::read(self.contract.publish_market_fees(token)).await
    }

    pub async fn market_fee(&self, token: Address) -> Result<U256, SdkError> {
        self.publish_market_fee(token).await
    }

    pub async fn get_opc_collector(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.get_opc_collector()).await
    }

    pub async fn get_publish_market_collector(&self) -> Result<Address, SdkError> {
        tx::read(self.contract.get_publish_market_collector()).await
    }

    pub async fn collect_opc(&self) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.collect_opc(), self.confirmations).await
    }

    pub async fn collect_market_fee(&self) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.collect_market_fee(), self.confirmations).await
    }

    /// Only callable by the current publish-market collector.
    pub async fn update_publish_market_fee(
        &self,
        new_collector: Address,
        new_swap_fee: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(
            self.contract.update_publish_market_fee(new_collector, new_swap_fee),
            self.confirmations,
        )
        .await
    }

    /// Caller must be the controller and the pool must not be finalized.
    pub async fn set_swap_fee(&self, swap_fee: U256) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.set_swap_fee(swap_fee), self.confirmations).await
    }

    // ─── Control ──────────────────────────────────────────────────────────

    /// One-way transition to the finalized state. `bind`, `rebind`,
    /// `setSwapFee` and `setPublicSwap` revert with `ERR_IS_FINALIZED`
    /// afterwards, and public swapping is switched on.
    pub async fn finalize(&self) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.finalize(), self.confirmations).await
    }

    /// Binds `token` with `balance` and denormalized `weight`; tokens are
    /// pulled from the caller.
    ///
    /// The contract rejects with `ERR_NOT_CONTROLLER`, `ERR_IS_BOUND`,
    /// `ERR_IS_FINALIZED`, `ERR_ERC20_FALSE` or `ERR_MAX_TOKENS`.
    pub async fn bind(
        &self,
        token: Address,
        balance: U256,
        weight: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.bind(token, balance, weight), self.confirmations).await
    }

    /// Changes balance and weight of an already-bound token.
    pub async fn rebind(
        &self,
        token: Address,
        balance: U256,
        weight: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(self.contract.rebind(token, balance, weight), self.confirmations).await
    }

    // ─── Pricing ──────────────────────────────────────────────────────────

    /// Marginal price of `token_out` in `token_in`, including the given
    /// consume-market fee.
    pub async fn get_spot_price(
        &self,
        token_in: Address,
        token_out: Address,
        consume_market_swap_fee: U256,
    ) -> Result<U256, SdkError> {
        tx::read(
            self.contract
                .get_spot_price(token_in, token_out, consume_market_swap_fee),
        )
        .await
    }

    /// How much `token_in` buys exactly `token_amount_out`, with the fee split.
    pub async fn get_amount_in_exact_out(
        &self,
        token_in: Address,
        token_out: Address,
        token_amount_out: U256,
        consume_market_swap_fee: U256,
    ) -> Result<SwapQuote, SdkError> {
        let raw = tx::read(self.contract.get_amount_in_exact_out(
            token_in,
            token_out,
            token_amount_out,
            consume_market_swap_fee,
        ))
        .await?;
        Ok(SwapQuote::from(raw))
    }

    /// How much `token_out` exactly `token_amount_in` buys, with the fee split.
    pub async fn get_amount_out_exact_in(
        &self,
        token_in: Address,
        token_out: Address,
        token_amount_in: U256,
        consume_market_swap_fee: U256,
    ) -> Result<SwapQuote, SdkError> {
        let raw = tx::read(self.contract.get_amount_out_exact_in(
            token_in,
            token_out,
            token_amount_in,
            consume_market_swap_fee,
        ))
        .await?;
        debug!("Quote {:?} -> {:?}: {:?}", token_in, token_out, raw);
        Ok(SwapQuote::from(raw))
    }

    pub async fn calc_pool_out_single_in(
        &self,
        token_in: Address,
        token_amount_in: U256,
    ) -> Result<U256, SdkError> {
        tx::read(self.contract.calc_pool_out_single_in(token_in, token_amount_in)).await
    }

    pub async fn calc_pool_in_single_out(
        &self,
        token_out: Address,
        token_amount_out: U256,
    ) -> Result<U256, SdkError> {
        tx::read(self.contract.calc_pool_in_single_out(token_out, token_amount_out)).await
    }

    pub async fn calc_single_in_pool_out(
        &self,
        token_in: Address,
        pool_amount_out: U256,
    ) -> Result<U256, SdkError> {
        tx::read(self.contract.calc_single_in_pool_out(token_in, pool_amount_out)).await
    }

    pub async fn calc_single_out_pool_in(
        &self,
        token_out: Address,
        pool_amount_in: U256,
    ) -> Result<U256, SdkError> {
        tx::read(self.contract.calc_single_out_pool_in(token_out, pool_amount_in)).await
    }

    // ─── Liquidity ────────────────────────────────────────────────────────

    /// Mints `pool_amount_out` shares, pulling each bound token up to the
    /// matching entry of `max_amounts_in` (pool token order). Every token
    /// must be approved for the pool first.
    pub async fn join_pool(
        &self,
        pool_amount_out: U256,
        max_amounts_in: Vec<U256>,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(
            self.contract.join_pool(pool_amount_out, max_amounts_in),
            self.confirmations,
        )
        .await
    }

    /// Burns `pool_amount_in` shares for at least `min_amounts_out` of each token.
    pub async fn exit_pool(
        &self,
        pool_amount_in: U256,
        min_amounts_out: Vec<U256>,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(
            self.contract.exit_pool(pool_amount_in, min_amounts_out),
            self.confirmations,
        )
        .await
    }

    /// Pays `token_amount_in` of one token for at least `min_pool_amount_out` shares.
    pub async fn join_swap_extern_amount_in(
        &self,
        token_in: Address,
        token_amount_in: U256,
        min_pool_amount_out: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(
            self.contract
                .joinswap_extern_amount_in(token_in, token_amount_in, min_pool_amount_out),
            self.confirmations,
        )
        .await
    }

    /// Gets exactly `pool_amount_out` shares paying at most `max_amount_in`.
    pub async fn join_swap_pool_amount_out(
        &self,
        token_in: Address,
        pool_amount_out: U256,
        max_amount_in: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(
            self.contract
                .joinswap_pool_amount_out(token_in, pool_amount_out, max_amount_in),
            self.confirmations,
        )
        .await
    }

    /// Burns `pool_amount_in` shares for at least `min_amount_out` of `token_out`.
    pub async fn exit_swap_pool_amount_in(
        &self,
        token_out: Address,
        pool_amount_in: U256,
        min_amount_out: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(
            self.contract
                .exitswap_pool_amount_in(token_out, pool_amount_in, min_amount_out),
            self.confirmations,
        )
        .await
    }

    /// Gets exactly `token_amount_out` burning at most `max_pool_amount_in` shares.
    pub async fn exit_swap_extern_amount_out(
        &self,
        token_out: Address,
        token_amount_out: U256,
        max_pool_amount_in: U256,
    ) -> Result<TransactionReceipt, SdkError> {
        tx::send(
            self.contract
                .exitswap_extern_amount_out(token_out, token_amount_out, max_pool_amount_in),
            self.confirmations,
        )
        .await
    }

    // ─── Swaps ────────────────────────────────────────────────────────────

    /// Trades exactly `token_amount_in` for at least `min_amount_out`, with
    /// the post-trade spot price bounded by `max_price`.
    pub async fn swap_exact_amount_in(
        &self,
        swap: &SwapExactIn,
    ) -> Result<TransactionReceipt, SdkError> {
        let (tokens, amounts) = swap.packed();
        tx::send(
            self.contract.swap_exact_amount_in(tokens, amounts),
            self.confirmations,
        )
        .await
    }

    /// Receives exactly `token_amount_out` paying at most `max_amount_in`.
    pub async fn swap_exact_amount_out(
        &self,
        swap: &SwapExactOut,
    ) -> Result<TransactionReceipt, SdkError> {
        let (tokens, amounts) = swap.packed();
        tx::send(
            self.contract.swap_exact_amount_out(tokens, amounts),
            self.confirmations,
        )
        .await
    }

    // ─── Events ───────────────────────────────────────────────────────────

    pub fn swap_events(receipt: &TransactionReceipt) -> Vec<LogSwapFilter> {
        tx::events_from_receipt(receipt)
    }

    pub fn swap_fee_events(receipt: &TransactionReceipt) -> Vec<SwapFeesFilter> {
        tx::events_from_receipt(receipt)
    }

    pub fn join_events(receipt: &TransactionReceipt) -> Vec<LogJoinFilter> {
        tx::events_from_receipt(receipt)
    }

    pub fn exit_events(receipt: &TransactionReceipt) -> Vec<LogExitFilter> {
        tx::events_from_receipt(receipt)
    }
}

/// Point-in-time view of a pool, read concurrently.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub address: Address,
    pub datatoken: Address,
    pub base_token: Address,
    pub datatoken_balance: U256,
    pub base_token_balance: U256,
    pub swap_fee: U256,
    pub market_fee: U256,
    pub opc_fee: U256,
    pub finalized: bool,
}

impl<M: Middleware + 'static> BPool<M> {
    pub async fn snapshot(&self) -> Result<PoolSnapshot, SdkError> {
        let (datatoken, base_token) = futures::try_join!(
            self.get_datatoken_address(),
            self.get_base_token_address()
        )?;
        let (datatoken_balance, base_token_balance, swap_fee, market_fee, opc_fee, finalized) =
            futures::try_join!(
                self.get_balance(datatoken),
                self.get_balance(base_token),
                self.get_swap_fee(),
                self.get_market_fee(),
                self.opc_fee(),
                self.is_finalized()
            )?;
        Ok(PoolSnapshot {
            address: self.address(),
            datatoken,
            base_token,
            datatoken_balance,
            base_token_balance,
            swap_fee,
            market_fee,
            opc_fee,
            finalized,
        })
    }
}
