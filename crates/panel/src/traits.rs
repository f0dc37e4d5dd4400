//! Seams between the panel and its collaborators

use crate::config::PanelConfig;
use async_trait::async_trait;
use ethers::types::{Address, Bytes, H256, U256};
use futures::future::BoxFuture;
use smart_wallet_client::OnBuild;
use smart_wallet_primitives::UserOperationHash;
use std::fmt;

/// Wallet provider (holder of the externally-owned accounts)
#[async_trait]
pub trait WalletProvider: Send + Sync + 'static {
    /// Signing interface handed to the account abstraction layer
    type Signer: Send + 'static;

    /// Derives the signer for `address`
    async fn get_signer(&self, address: Address) -> eyre::Result<Self::Signer>;

    /// Native balance of `address` in wei
    async fn get_balance(&self, address: Address) -> eyre::Result<U256>;
}

/// Smart account handle
pub trait SmartAccount: Send + Sync + 'static {
    /// Transfer instruction consumed by the matching [UserOperationClient](UserOperationClient)
    type Call: Send + 'static;

    /// Address of the smart account
    fn sender(&self) -> Address;

    /// Builds the `execute(to, value, data)` instruction
    fn execute(&self, to: Address, value: U256, data: Bytes) -> Self::Call;
}

/// Future resolving to the transaction hash of the bundle that included the user operation, or
/// `None` if the client reported no settlement
pub type Settlement = BoxFuture<'static, eyre::Result<Option<H256>>>;

/// A user operation accepted by the client
pub struct SentOperation {
    pub user_op_hash: UserOperationHash,
    settlement: Settlement,
}

impl SentOperation {
    pub fn new(user_op_hash: UserOperationHash, settlement: Settlement) -> Self {
        Self { user_op_hash, settlement }
    }

    /// Waits for settlement
    pub async fn wait(self) -> eyre::Result<Option<H256>> {
        self.settlement.await
    }
}

impl fmt::Debug for SentOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentOperation").field("user_op_hash", &self.user_op_hash).finish()
    }
}

/// Client handle submitting instructions built by a [SmartAccount](SmartAccount)
#[async_trait]
pub trait UserOperationClient<C: Send + 'static>: Send + Sync + 'static {
    async fn send_user_operation(&self, call: C, on_build: OnBuild) -> eyre::Result<SentOperation>;
}

/// Account abstraction SDK building the smart account and client handles
#[async_trait]
pub trait AccountAbstraction<S: Send + 'static>: Send + Sync + 'static {
    type Account: SmartAccount;
    type Client: UserOperationClient<<Self::Account as SmartAccount>::Call>;

    /// Builds the smart account controlled by `signer`. `Ok(None)` means the SDK yielded no
    /// usable account.
    async fn init_account(
        &self,
        signer: S,
        config: &PanelConfig,
    ) -> eyre::Result<Option<Self::Account>>;

    /// Builds the client submitting user operations to the bundler
    async fn init_client(&self, config: &PanelConfig) -> eyre::Result<Self::Client>;
}
