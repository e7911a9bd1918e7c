use ethers::prelude::abigen;

abigen!(
    SideStaking,
    r#"[
        function getVestingAmount(address datatokenAddress) external view returns (uint256)
        function getvestingEndBlock(address datatokenAddress) external view returns (uint256)
        function getDatatokenCirculatingSupply(address datatokenAddress) external view returns (uint256)
        function getBaseTokenBalance(address datatokenAddress) external view returns (uint256)
        function getPoolAddress(address datatokenAddress) external view returns (address)
    ]"#
);
