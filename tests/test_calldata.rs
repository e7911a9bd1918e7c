//! Calldata produced by the bindings
//!
//! Selectors are checked against the canonical signatures the deployed
//! contracts expose, including the functions called by name.

use ethers::abi::{decode, ParamType, Token};
use ethers::providers::Provider;
use ethers::types::{Address, Bytes, U256};
use ethers::utils::id;
use ocean_sdk::contracts::data_nft::CREATE_ERC20;
use ocean_sdk::contracts::datatoken::GET_ERC721_ADDRESS;
use ocean_sdk::contracts::{ConsumeMarketFee, DataNftTemplate, DatatokenTemplate, ProviderFee};
use ocean_sdk::types::SwapExactIn;
use ocean_sdk::BPool;
use std::sync::Arc;

fn selector(data: &Bytes) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&data[..4]);
    out
}

/// Test the packed swap arguments keep their positional order
#[test]
fn test_swap_exact_amount_in_calldata() {
    let (provider, _mock) = Provider::mocked();
    let pool = BPool::new(Address::repeat_byte(1), Arc::new(provider));

    let swap = SwapExactIn {
        token_in: Address::repeat_byte(0xa1),
        token_out: Address::repeat_byte(0xb2),
        consume_market_fee_address: Address::repeat_byte(0xc3),
        token_amount_in: U256::from(100),
        min_amount_out: U256::from(90),
        max_price: U256::from(2),
        consume_market_swap_fee: U256::from(5),
    };
    let (tokens, amounts) = swap.packed();
    let data = pool
        .contract()
        .swap_exact_amount_in(tokens, amounts)
        .calldata()
        .expect("calldata");

    assert_eq!(
        selector(&data),
        id("swapExactAmountIn(address[3],uint256[4])")
    );

    let decoded = decode(
        &[
            ParamType::FixedArray(Box::new(ParamType::Address), 3),
            ParamType::FixedArray(Box::new(ParamType::Uint(256)), 4),
        ],
        &data[4..],
    )
    .unwrap();
    assert_eq!(
        decoded[0],
        Token::FixedArray(vec![
            Token::Address(swap.token_in),
            Token::Address(swap.token_out),
            Token::Address(swap.consume_market_fee_address),
        ])
    );
    assert_eq!(
        decoded[1],
        Token::FixedArray(vec![
            Token::Uint(U256::from(100)),
            Token::Uint(U256::from(90)),
            Token::Uint(U256::from(2)),
            Token::Uint(U256::from(5)),
        ])
    );
}

/// Test functions whose names carry digits are encoded by name
#[test]
fn test_by_name_selectors() {
    let (provider, _mock) = Provider::mocked();
    let client = Arc::new(provider);

    let nft = DataNftTemplate::new(Address::repeat_byte(2), client.clone());
    let call = nft
        .method::<_, Address>(
            CREATE_ERC20,
            (
                U256::one(),
                vec!["DT1".to_string(), "DTSYM".to_string()],
                Vec::<Address>::new(),
                Vec::<U256>::new(),
                Vec::<Bytes>::new(),
            ),
        )
        .unwrap();
    assert_eq!(
        selector(&call.calldata().unwrap()),
        id("createERC20(uint256,string[],address[],uint256[],bytes[])")
    );

    let datatoken = DatatokenTemplate::new(Address::repeat_byte(3), client);
    let call = datatoken
        .method::<_, Address>(GET_ERC721_ADDRESS, ())
        .unwrap();
    assert_eq!(selector(&call.calldata().unwrap()), id("getERC721Address()"));
}

/// Test tuple arguments are flattened into the signature
#[test]
fn test_start_order_selector() {
    let (provider, _mock) = Provider::mocked();
    let datatoken = DatatokenTemplate::new(Address::repeat_byte(3), Arc::new(provider));

    let data = datatoken
        .start_order(
            Address::repeat_byte(4),
            U256::zero(),
            ProviderFee::default(),
            ConsumeMarketFee::default(),
        )
        .calldata()
        .unwrap();
    assert_eq!(
        selector(&data),
        id("startOrder(address,uint256,(address,address,uint256,uint8,bytes32,bytes32,uint256,bytes),(address,address,uint256))")
    );
}
