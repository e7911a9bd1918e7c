// Models Module - typed wrappers over the contract bindings
//
// Wrappers own an abigen binding plus the number of confirmations to wait
// for. Reads go through `tx::read`, writes through `tx::send`.

pub mod bpool;
pub mod data_nft;
pub mod datatoken;
pub mod erc20;
pub mod factory_router;
pub mod fixed_rate;
pub mod nft_factory;
pub mod side_staking;
pub mod tx;

pub use bpool::{BPool, PoolSnapshot};
pub use data_nft::{DataNft, MetadataInfo, MetadataUpdate};
pub use datatoken::{Datatoken, DeployedExchange, DeployedPool, ProviderFeeResponse};
pub use erc20::Erc20Token;
pub use factory_router::FactoryRouter;
pub use fixed_rate::{ExchangeFees, ExchangeQuote, FixedRateExchange};
pub use nft_factory::NftFactory;
pub use side_staking::SideStaking;
