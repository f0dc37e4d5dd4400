use crate::utils::{parse_address, validate_private_key};
use clap::Parser;
use ethers::types::Address;
use expanded_pathbuf::ExpandedPathBuf;
use smart_wallet_panel::PanelConfig;
use smart_wallet_primitives::constants::{
    entry_point, rpc::DEFAULT_RPC_URL, settlement, simple_account,
};
use std::time::Duration;

/// Wallet panel CLI args
#[derive(Debug, Clone, Parser)]
pub struct PanelArgs {
    /// Ethereum execution client and bundler RPC URL.
    #[clap(long, env = "SMART_WALLET_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Entry point contract address.
    #[clap(long, default_value = entry_point::ADDRESS, value_parser=parse_address)]
    pub entry_point: Address,

    /// Simple account factory contract address.
    #[clap(long, default_value = simple_account::FACTORY_ADDRESS, value_parser=parse_address)]
    pub factory: Address,

    /// Path to the mnemonic file of the signer wallet.
    ///
    /// Without a mnemonic file the panel has no wallet provider and only shows the connect
    /// prompt.
    #[clap(long)]
    pub mnemonic_file: Option<ExpandedPathBuf>,

    /// Hex encoded private key of the signer wallet (instead of a mnemonic file).
    #[clap(long, value_parser=validate_private_key, conflicts_with = "mnemonic_file")]
    pub private_key: Option<String>,

    /// Index of the account derived from the mnemonic.
    #[clap(long, default_value_t = 0)]
    pub account_index: u32,

    /// Signer address. Defaults to the wallet derived from the mnemonic.
    #[clap(long, value_parser=parse_address)]
    pub signer: Option<Address>,

    /// Interval between user operation receipt lookups in milliseconds.
    #[clap(long, default_value_t = settlement::WAIT_INTERVAL_MS)]
    pub wait_interval: u64,

    /// How long to wait for the user operation receipt in milliseconds.
    #[clap(long, default_value_t = settlement::WAIT_TIMEOUT_MS)]
    pub wait_timeout: u64,
}

impl PanelArgs {
    pub fn config(&self) -> PanelConfig {
        PanelConfig::new(self.rpc_url.clone(), self.entry_point, self.factory)
    }

    pub fn wait_interval(&self) -> Duration {
        Duration::from_millis(self.wait_interval)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout)
    }
}

/// Create wallet CLI args
#[derive(Debug, Clone, Parser)]
pub struct CreateWalletArgs {
    /// The path where the mnemonic will be stored.
    #[clap(long, short)]
    pub output_path: Option<ExpandedPathBuf>,

    /// The chain id.
    #[clap(long, default_value_t = 1)]
    pub chain_id: u64,
}
