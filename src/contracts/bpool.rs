use ethers::prelude::abigen;

// ═══════════════════════════════════════════════════════════════════════════
// BPOOL ABI (two-token weighted pool with swap-fee accounting)
// ═══════════════════════════════════════════════════════════════════════════
//
// Swaps pack their arguments:
// - tokenInOutMarket   = [tokenIn, tokenOut, consumeMarketFeeAddress]
// - amountsInOutMaxFee = [amountIn|maxAmountIn, minAmountOut|amountOut, maxPrice, consumeMarketSwapFee]
// ═══════════════════════════════════════════════════════════════════════════

abigen!(
    BPool,
    r#"[
        function initialize(address controller, address factory, uint256[] swapFees, bool publicSwap, bool finalized, address[2] tokens, address[2] feeCollectors) external returns (bool)
        function setup(address datatokenAddress, uint256 datatokenAmount, uint256 datatokenWeight, address baseTokenAddress, uint256 baseTokenAmount, uint256 baseTokenWeight, uint256 swapFee) external
        function isPublicSwap() external view returns (bool)
        function isFinalized() external view returns (bool)
        function isBound(address t) external view returns (bool)
        function getNumTokens() external view returns (uint256)
        function getCurrentTokens() external view returns (address[])
        function getFinalTokens() external view returns (address[])
        function getDenormalizedWeight(address token) external view returns (uint256)
        function getTotalDenormalizedWeight() external view returns (uint256)
        function getNormalizedWeight(address token) external view returns (uint256)
        function getBalance(address token) external view returns (uint256)
        function getSwapFee() external view returns (uint256)
        function getMarketFee() external view returns (uint256)
        function getOPCFee() external view returns (uint256)
        function communityFees(address token) external view returns (uint256)
        function publishMarketFees(address token) external view returns (uint256)
        function getController() external view returns (address)
        function getDatatokenAddress() external view returns (address)
        function getBaseTokenAddress() external view returns (address)
        function getOPCCollector() external view returns (address)
        function getPublishMarketCollector() external view returns (address)
        function totalSupply() external view returns (uint256)
        function balanceOf(address whom) external view returns (uint256)
        function getSpotPrice(address tokenIn, address tokenOut, uint256 consumeMarketSwapFee) external view returns (uint256 spotPrice)
        function getAmountInExactOut(address tokenIn, address tokenOut, uint256 tokenAmountOut, uint256 consumeMarketSwapFee) external view returns (uint256 tokenAmountIn, uint256 lpFeeAmount, uint256 oceanFeeAmount, uint256 publishMarketSwapFeeAmount, uint256 consumeMarketSwapFeeAmount)
        function getAmountOutExactIn(address tokenIn, address tokenOut, uint256 tokenAmountIn, uint256 consumeMarketSwapFee) external view returns (uint256 tokenAmountOut, uint256 lpFeeAmount, uint256 oceanFeeAmount, uint256 publishMarketSwapFeeAmount, uint256 consumeMarketSwapFeeAmount)
        function calcPoolOutSingleIn(address tokenIn, uint256 tokenAmountIn) external view returns (uint256 poolAmountOut)
        function calcPoolInSingleOut(address tokenOut, uint256 tokenAmountOut) external view returns (uint256 poolAmountIn)
        function calcSingleInPoolOut(address tokenIn, uint256 poolAmountOut) external view returns (uint256 tokenAmountIn)
        function calcSingleOutPoolIn(address tokenOut, uint256 poolAmountIn) external view returns (uint256 tokenAmountOut)
        function collectOPC() external
        function collectMarketFee() external
        function updatePublishMarketFee(address newCollector, uint256 newSwapFee) external
        function setSwapFee(uint256 swapFee) external
        function finalize() external
        function bind(address token, uint256 balance, uint256 denorm) external
        function rebind(address token, uint256 balance, uint256 denorm) external
        function joinPool(uint256 poolAmountOut, uint256[] maxAmountsIn) external
        function exitPool(uint256 poolAmountIn, uint256[] minAmountsOut) external
        function swapExactAmountIn(address[3] tokenInOutMarket, uint256[4] amountsInOutMaxFee) external returns (uint256 tokenAmountOut, uint256 spotPriceAfter)
        function swapExactAmountOut(address[3] tokenInOutMarket, uint256[4] amountsInOutMaxFee) external returns (uint256 tokenAmountIn, uint256 spotPriceAfter)
        function joinswapExternAmountIn(address tokenIn, uint256 tokenAmountIn, uint256 minPoolAmountOut) external returns (uint256 poolAmountOut)
        function joinswapPoolAmountOut(address tokenIn, uint256 poolAmountOut, uint256 maxAmountIn) external returns (uint256 tokenAmountIn)
        function exitswapPoolAmountIn(address tokenOut, uint256 poolAmountIn, uint256 minAmountOut) external returns (uint256 tokenAmountOut)
        function exitswapExternAmountOut(address tokenOut, uint256 tokenAmountOut, uint256 maxPoolAmountIn) external returns (uint256 poolAmountIn)
        event LOG_SWAP(address indexed caller, address indexed tokenIn, address indexed tokenOut, uint256 tokenAmountIn, uint256 tokenAmountOut, uint256 timestamp, uint256 inBalance, uint256 outBalance, uint256 newSpotPrice)
        event LOG_JOIN(address indexed caller, address indexed tokenIn, uint256 tokenAmountIn, uint256 timestamp)
        event LOG_EXIT(address indexed caller, address indexed tokenOut, uint256 tokenAmountOut, uint256 timestamp)
        event LOG_CALL(bytes4 indexed sig, address indexed caller, uint256 timestamp, bytes data)
        event LOG_BPT(uint256 bptAmount)
        event SWAP_FEES(uint256 lpFeeAmount, uint256 oceanFeeAmount, uint256 marketFeeAmount, uint256 consumeMarketFeeAmount, address tokenFeeAddress)
    ]"#
);
