use ethers::types::Address;

/// Configuration read on every initialization of the panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    /// Ethereum execution client / bundler RPC endpoint
    pub rpc_url: String,
    /// Entry point contract address
    pub entry_point: Address,
    /// Simple account factory contract address
    pub factory: Address,
}

impl PanelConfig {
    pub fn new(rpc_url: impl Into<String>, entry_point: Address, factory: Address) -> Self {
        Self { rpc_url: rpc_url.into(), entry_point, factory }
    }
}
