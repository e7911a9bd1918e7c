use ethers::prelude::abigen;

// Data NFT (ERC721 template). Holds the asset metadata.
abigen!(
    DataNftTemplate,
    r#"[
        struct MetaDataProof { address validatorAddress; uint8 v; bytes32 r; bytes32 s; }
        function name() external view returns (string)
        function symbol() external view returns (string)
        function ownerOf(uint256 tokenId) external view returns (address)
        function getMetaData() external view returns (string, string, uint8, bool)
        function setMetaData(uint8 metaDataState, string metaDataDecryptorUrl, string metaDataDecryptorAddress, bytes flags, bytes data, bytes32 metaDataHash, MetaDataProof[] metadataProofs) external
        function setMetaDataState(uint8 metaDataState) external
        function createERC20(uint256 templateIndex, string[] strings, address[] addresses, uint256[] uints, bytes[] bytess) external returns (address)
        event MetadataCreated(address indexed createdBy, uint8 state, string decryptorUrl, bytes flags, bytes data, bytes metaDataHash, uint256 timestamp, uint256 blockNumber)
        event MetadataUpdated(address indexed updatedBy, uint8 state, string decryptorUrl, bytes flags, bytes data, bytes metaDataHash, uint256 timestamp, uint256 blockNumber)
        event MetadataState(address indexed updatedBy, uint8 state, uint256 timestamp, uint256 blockNumber)
    ]"#
);

// Selectors whose names carry digits are called by name through `Contract::method`
// (the generated snake-case names split on digits).
pub const CREATE_ERC20: &str = "createERC20";
