use ethers::contract::abigen;

abigen!(
    EntryPointAPI,
    r#"[
        struct UserOperation {address sender;uint256 nonce;bytes initCode;bytes callData;uint256 callGasLimit;uint256 verificationGasLimit;uint256 preVerificationGas;uint256 maxFeePerGas;uint256 maxPriorityFeePerGas;bytes paymasterAndData;bytes signature;}
        function getSenderAddress(bytes memory initCode) external
        function getUserOpHash(UserOperation calldata userOp) external view returns (bytes32)
        function getNonce(address sender, uint192 key) public view returns (uint256 nonce)
        error FailedOp(uint256 opIndex, string reason)
        error SenderAddressResult(address sender)
    ]"#
);

abigen!(
    SimpleAccountFactoryAPI,
    r#"[
        function createAccount(address owner,uint256 salt) public returns (address ret)
        function getAddress(address owner,uint256 salt) public view returns (address)
    ]"#
);

abigen!(
    SimpleAccountAPI,
    r#"[
        function execute(address dest, uint256 value, bytes calldata func) external
        function executeBatch(address[] calldata dest, bytes[] calldata func) external
        function owner() public view returns (address)
    ]"#
);
