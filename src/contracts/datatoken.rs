use ethers::prelude::abigen;

// Datatoken (ERC20 template). Plain ERC20 reads live in `erc20.rs`.
abigen!(
    DatatokenTemplate,
    r#"[
        struct RolesERC20 { bool minter; bool paymentManager; }
        struct ProviderFee { address providerFeeAddress; address providerFeeToken; uint256 providerFeeAmount; uint8 v; bytes32 r; bytes32 s; uint256 validUntil; bytes providerData; }
        struct ConsumeMarketFee { address consumeMarketFeeAddress; address consumeMarketFeeToken; uint256 consumeMarketFeeAmount; }
        function mint(address account, uint256 value) external
        function isMinter(address account) external view returns (bool)
        function getPermissions(address user) external view returns (RolesERC20)
        function getPublishingMarketFee() external view returns (address, address, uint256)
        function getERC721Address() external view returns (address)
        function deployPool(uint256[] ssParams, uint256[] swapFees, address[] addresses) external returns (address)
        function createFixedRate(address fixedPriceAddress, address[] addresses, uint256[] uints) external returns (bytes32)
        function startOrder(address consumer, uint256 serviceIndex, ProviderFee providerFee, ConsumeMarketFee consumeMarketFee) external
        event NewPool(address poolAddress, address ssContract, address baseTokenAddress)
        event NewFixedRate(bytes32 exchangeId, address indexed owner, address exchangeContract, address indexed baseToken)
        event OrderStarted(address indexed consumer, address payer, uint256 amount, uint256 serviceIndex, uint256 timestamp, address indexed publishMarketAddress, uint256 blockNumber)
    ]"#
);

pub const GET_ERC721_ADDRESS: &str = "getERC721Address";
