// Contracts Module - ABI bindings for the deployed protocol contracts
//
// Every binding lives in its own module: the generated call/event types
// (`TransferFilter`, `NewPoolFilter`, ...) collide otherwise.

pub mod bpool;
pub mod data_nft;
pub mod datatoken;
pub mod erc20;
pub mod factory_router;
pub mod fixed_rate_exchange;
pub mod nft_factory;
pub mod side_staking;

// Public exports
pub use bpool::{BPool, LogExitFilter, LogJoinFilter, LogSwapFilter, SwapFeesFilter};
pub use data_nft::{DataNftTemplate, MetaDataProof, MetadataCreatedFilter, MetadataUpdatedFilter};
pub use datatoken::{
    ConsumeMarketFee, DatatokenTemplate, NewFixedRateFilter, OrderStartedFilter, ProviderFee,
};
pub use erc20::Erc20;
pub use factory_router::{FactoryRouter, Operations, Stakes};
pub use fixed_rate_exchange::{FixedRateExchange, SwappedFilter};
pub use nft_factory::{ErcCreateData, NftCreateData, NftFactory, TokenCreatedFilter};
pub use side_staking::SideStaking;
