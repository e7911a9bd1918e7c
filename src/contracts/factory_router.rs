use ethers::prelude::abigen;

abigen!(
    FactoryRouter,
    r#"[
        struct Stakes { address poolAddress; uint256 tokenAmountIn; uint256 minPoolAmountOut; }
        struct Operations { bytes32 exchangeIds; address source; uint8 operation; address tokenIn; uint256 amountsIn; address tokenOut; uint256 amountsOut; uint256 maxPrice; uint256 swapMarketFee; address marketFeeAddress; }
        function routerOwner() external view returns (address)
        function factory() external view returns (address)
        function swapOceanFee() external view returns (uint256)
        function swapNonOceanFee() external view returns (uint256)
        function isApprovedToken(address token) external view returns (bool)
        function isSSContract(address ssContract) external view returns (bool)
        function isFixedRateContract(address fixedRate) external view returns (bool)
        function isDispenserContract(address dispenser) external view returns (bool)
        function getOPCFee(address baseToken) external view returns (uint256)
        function getOPCConsumeFee() external view returns (uint256)
        function getOPCProviderFee() external view returns (uint256)
        function getMinVestingPeriod() external view returns (uint256)
        function getOPCCollector() external view returns (address)
        function stakeBatch(Stakes[] stakes) external
        function buyDTBatch(Operations[] operations) external
        event NewPool(address indexed poolAddress, bool isOcean)
    ]"#
);
