use ethers::prelude::abigen;

abigen!(
    NftFactory,
    r#"[
        struct NftCreateData { string name; string symbol; uint256 templateIndex; string tokenUri; bool transferable; address owner; }
        struct ErcCreateData { uint256 templateIndex; string[] strings; address[] addresses; uint256[] uints; bytes[] bytess; }
        function getCurrentNFTCount() external view returns (uint256)
        function getCurrentTokenCount() external view returns (uint256)
        function deployERC721Contract(string name, string symbol, uint256 templateIndex, address additionalERC20Deployer, address additionalMetaDataUpdater, string tokenURI, bool transferable, address owner) external returns (address)
        function createNftWithErc20(NftCreateData nftCreateData, ErcCreateData ercCreateData) external returns (address, address)
        event NFTCreated(address indexed newTokenAddress, address indexed templateAddress, string tokenName, address admin, string symbol, string tokenURI, bool transferable, address indexed creator)
        event TokenCreated(address indexed newTokenAddress, address indexed templateAddress, string name, string symbol, uint256 cap, address creator)
    ]"#
);

// Selectors whose names carry digits are called by name through `Contract::method`
// (the generated snake-case names split on digits).
pub const GET_CURRENT_NFT_COUNT: &str = "getCurrentNFTCount";
pub const DEPLOY_ERC721: &str = "deployERC721Contract";
pub const CREATE_NFT_WITH_ERC20: &str = "createNftWithErc20";

/// `NFTCreated` is matched by topic: the new NFT address is its first indexed field.
pub const NFT_CREATED_SIGNATURE: &str =
    "NFTCreated(address,address,string,address,string,string,bool,address)";
