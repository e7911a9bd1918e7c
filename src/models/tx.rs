//! Shared plumbing for contract wrappers: read calls, transaction
//! submission and receipt/event decoding.

use crate::errors::SdkError;
use ethers::abi::{Detokenize, RawLog};
use ethers::contract::{ContractCall, EthEvent};
use ethers::providers::Middleware;
use ethers::types::{Address, Log, TransactionReceipt, H256, U64};
use ethers::utils::keccak256;
use log::{debug, info, warn};

/// Gas limit used for pool `setup`, which deploys a fair amount of state.
pub const GASLIMIT_POOL_SETUP: u64 = 5_000_000;

/// Executes a read-only call against the latest block.
pub async fn read<M, D>(call: ContractCall<M, D>) -> Result<D, SdkError>
where
    M: Middleware + 'static,
    D: Detokenize,
{
    call.call().await.map_err(SdkError::from_contract)
}

/// Submits a state-changing call and waits for `confirmations` blocks.
///
/// A receipt with status 0 is reported as [`SdkError::Reverted`].
pub async fn send<M, D>(
    call: ContractCall<M, D>,
    confirmations: usize,
) -> Result<TransactionReceipt, SdkError>
where
    M: Middleware + 'static,
    D: Detokenize,
{
    let pending = call.send().await.map_err(SdkError::from_contract)?;
    let tx_hash = *pending;
    info!("📤 Sent transaction {:?}", tx_hash);

    let receipt = pending
        .confirmations(confirmations)
        .await?
        .ok_or(SdkError::Dropped(tx_hash))?;

    if !verify_tx(&receipt) {
        warn!("⚠️ Transaction {:?} reverted", tx_hash);
        return Err(SdkError::Reverted { tx_hash });
    }

    debug!(
        "✅ Transaction {:?} mined in block {:?}, gas used {:?}",
        tx_hash, receipt.block_number, receipt.gas_used
    );
    Ok(receipt)
}

/// True when the receipt reports success.
pub fn verify_tx(receipt: &TransactionReceipt) -> bool {
    receipt.status == Some(U64::one())
}

/// Decodes every log of type `E` in the receipt, in log order.
pub fn events_from_receipt<E: EthEvent>(receipt: &TransactionReceipt) -> Vec<E> {
    events_from_logs(&receipt.logs)
}

pub fn events_from_logs<E: EthEvent>(logs: &[Log]) -> Vec<E> {
    let signature = E::signature();
    logs.iter()
        .filter(|log| log.topics.first() == Some(&signature))
        .filter_map(|log| {
            let raw = RawLog::from(log.clone());
            match E::decode_log(&raw) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!("Failed to decode {} log: {}", E::name(), e);
                    None
                }
            }
        })
        .collect()
}

/// First event of type `E`, or [`SdkError::MissingEvent`].
pub fn first_event<E: EthEvent>(
    receipt: &TransactionReceipt,
    event: &'static str,
) -> Result<E, SdkError> {
    events_from_receipt::<E>(receipt)
        .into_iter()
        .next()
        .ok_or(SdkError::MissingEvent {
            event,
            tx_hash: receipt.transaction_hash,
        })
}

/// Reads an indexed address from the first log matching `signature`.
///
/// Used for events whose generated binding is not exported.
pub fn indexed_address(
    receipt: &TransactionReceipt,
    signature: &str,
    position: usize,
) -> Option<Address> {
    let topic0 = H256::from(keccak256(signature.as_bytes()));
    receipt
        .logs
        .iter()
        .find(|log| log.topics.first() == Some(&topic0))
        .and_then(|log| log.topics.get(position + 1))
        .map(|topic| Address::from(*topic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{LogJoinFilter, SwapFeesFilter};
    use ethers::abi::{encode, Token};
    use ethers::types::{Bytes, U256};

    fn log_with(topics: Vec<H256>, data: Vec<u8>) -> Log {
        Log {
            topics,
            data: Bytes::from(data),
            ..Default::default()
        }
    }

    fn address_topic(addr: Address) -> H256 {
        H256::from(addr)
    }

    #[test]
    fn decodes_only_matching_events() {
        let caller = Address::random();
        let token = Address::random();
        let join = log_with(
            vec![
                LogJoinFilter::signature(),
                address_topic(caller),
                address_topic(token),
            ],
            encode(&[Token::Uint(U256::from(42)), Token::Uint(U256::from(1000))]),
        );
        let fees = log_with(
            vec![SwapFeesFilter::signature()],
            encode(&[
                Token::Uint(U256::from(1)),
                Token::Uint(U256::from(2)),
                Token::Uint(U256::from(3)),
                Token::Uint(U256::from(4)),
                Token::Address(token),
            ]),
        );

        let receipt = TransactionReceipt {
            logs: vec![fees.clone(), join],
            status: Some(U64::one()),
            ..Default::default()
        };

        let joins: Vec<LogJoinFilter> = events_from_receipt(&receipt);
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].caller, caller);
        assert_eq!(joins[0].token_in, token);
        assert_eq!(joins[0].token_amount_in, U256::from(42));

        let swap_fees: Vec<SwapFeesFilter> = events_from_receipt(&receipt);
        assert_eq!(swap_fees.len(), 1);
        assert_eq!(swap_fees[0].ocean_fee_amount, U256::from(2));
        assert_eq!(swap_fees[0].token_fee_address, token);
    }

    #[test]
    fn missing_event_is_an_error() {
        let receipt = TransactionReceipt {
            transaction_hash: H256::repeat_byte(7),
            ..Default::default()
        };
        let err = first_event::<SwapFeesFilter>(&receipt, "SWAP_FEES").unwrap_err();
        assert!(matches!(err, SdkError::MissingEvent { event: "SWAP_FEES", .. }));
    }

    #[test]
    fn verify_tx_reads_status() {
        let mut receipt = TransactionReceipt::default();
        assert!(!verify_tx(&receipt));
        receipt.status = Some(U64::one());
        assert!(verify_tx(&receipt));
        receipt.status = Some(U64::zero());
        assert!(!verify_tx(&receipt));
    }

    #[test]
    fn indexed_address_reads_topics() {
        let nft = Address::random();
        let signature = crate::contracts::nft_factory::NFT_CREATED_SIGNATURE;
        let topic0 = H256::from(keccak256(signature.as_bytes()));
        let receipt = TransactionReceipt {
            logs: vec![log_with(
                vec![topic0, address_topic(nft), address_topic(Address::random())],
                vec![],
            )],
            ..Default::default()
        };
        assert_eq!(indexed_address(&receipt, signature, 0), Some(nft));
        assert_eq!(indexed_address(&receipt, "Other()", 0), None);
    }
}
