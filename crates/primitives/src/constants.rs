//! Account abstraction (ERC-4337)-related constants

/// Entry point smart contract
pub mod entry_point {
    /// Address of the entry point smart contract
    pub const ADDRESS: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
    /// Version of the entry point smart contract
    pub const VERSION: &str = "0.6.0";
}

/// Simple account (eth-infinitism reference account)
pub mod simple_account {
    /// Address of the stackup simple account factory
    pub const FACTORY_ADDRESS: &str = "0x9406Cc6185a346906296840746125a0E44976454";
    /// Salt used when deriving the counterfactual account address
    pub const SALT: u64 = 0;
    /// Key of the nonce sequence used for transfers
    pub const NONCE_KEY: u64 = 0;
    /// Signature used while estimating gas, before the operation is signed
    pub const DUMMY_SIGNATURE: &str = "0xfffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c";
}

/// Waiting for user operation settlement
pub mod settlement {
    /// Time between two receipt lookups (in milliseconds)
    pub const WAIT_INTERVAL_MS: u64 = 5_000;
    /// Time after which the settlement is reported as missing (in milliseconds)
    pub const WAIT_TIMEOUT_MS: u64 = 30_000;
}

/// Units
pub mod units {
    /// Number of decimals of the native currency
    pub const ETHER_DECIMALS: u32 = 18;
    /// Symbol shown next to balances
    pub const ETHER_SYMBOL: &str = "ETH";
}

/// RPC
pub mod rpc {
    /// The default node/bundler endpoint
    pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
}

/// Storage
pub mod storage {
    /// The default data directory name (relative to home)
    pub const DATA_DIR_NAME: &str = ".smart-wallet";
    /// The default name of the mnemonic file
    pub const MNEMONIC_FILE_NAME: &str = "mnemonic";
}
