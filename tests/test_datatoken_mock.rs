//! Datatoken reads against a mocked JSON-RPC provider

use ethers::abi::{encode, Token};
use ethers::providers::{MockProvider, Provider};
use ethers::types::{Address, Bytes, U256};
use ocean_sdk::types::{Permissions, PublishingMarketFee};
use ocean_sdk::Datatoken;
use std::sync::Arc;

fn mocked_datatoken() -> (Datatoken<Provider<MockProvider>>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let datatoken = Datatoken::new(Address::repeat_byte(0xd7), Arc::new(provider));
    (datatoken, mock)
}

fn push_result(mock: &MockProvider, tokens: &[Token]) {
    mock.push::<Bytes, _>(Bytes::from(encode(tokens)))
        .expect("Failed to push mock response");
}

/// Test that both roles are read in ABI order
#[tokio::test]
async fn test_get_permissions() {
    let (datatoken, mock) = mocked_datatoken();
    let user = Address::repeat_byte(0x11);

    push_result(&mock, &[Token::Bool(true), Token::Bool(false)]);
    assert_eq!(
        datatoken.get_permissions(user).await.unwrap(),
        Permissions {
            minter: true,
            payment_manager: false,
        }
    );

    push_result(&mock, &[Token::Bool(false), Token::Bool(true)]);
    let roles = datatoken.get_permissions(user).await.unwrap();
    assert!(!roles.minter);
    assert!(roles.payment_manager);
}

/// Test the publishing market order fee
#[tokio::test]
async fn test_get_publishing_market_fee() {
    let (datatoken, mock) = mocked_datatoken();
    let collector = Address::repeat_byte(0xc0);
    let token = Address::repeat_byte(0x0c);

    push_result(
        &mock,
        &[
            Token::Address(collector),
            Token::Address(token),
            Token::Uint(U256::exp10(18)),
        ],
    );
    assert_eq!(
        datatoken.get_publishing_market_fee().await.unwrap(),
        PublishingMarketFee {
            collector,
            token,
            amount: U256::exp10(18),
        }
    );
}
