//! Panel collaborators backed by an Ethereum execution client and an ERC-4337 bundler

use crate::{
    config::PanelConfig,
    traits::{AccountAbstraction, SentOperation, SmartAccount, UserOperationClient, WalletProvider},
};
use async_trait::async_trait;
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{Address, Bytes, U256},
};
use futures::FutureExt;
use smart_wallet_client::{
    Client, ClientError, OnBuild, SendOptions, SimpleAccount, UserOperationBuilder,
};
use smart_wallet_contracts::EntryPointError;
use smart_wallet_primitives::Wallet;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tracing::warn;

/// Wallet provider holding local wallets
pub struct LocalWalletProvider<M: Middleware + 'static> {
    eth_client: Arc<M>,
    wallets: HashMap<Address, Wallet>,
}

impl<M: Middleware + 'static> LocalWalletProvider<M> {
    pub fn new(eth_client: Arc<M>, wallets: Vec<Wallet>) -> Self {
        Self { eth_client, wallets: wallets.into_iter().map(|w| (w.address(), w)).collect() }
    }

    /// Addresses of the held wallets
    pub fn addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<_> = self.wallets.keys().copied().collect();
        addresses.sort();
        addresses
    }
}

#[async_trait]
impl<M: Middleware + 'static> WalletProvider for LocalWalletProvider<M> {
    type Signer = Wallet;

    async fn get_signer(&self, address: Address) -> eyre::Result<Wallet> {
        self.wallets
            .get(&address)
            .cloned()
            .ok_or_else(|| eyre::eyre!("No wallet for signer {address:?}"))
    }

    async fn get_balance(&self, address: Address) -> eyre::Result<U256> {
        self.eth_client
            .get_balance(address, None)
            .await
            .map_err(|err| eyre::eyre!("Failed to get balance of {address:?}: {err:?}"))
    }
}

/// Simple account SDK: [SimpleAccount](SimpleAccount) handles and a bundler [Client](Client)
#[derive(Clone, Debug, Default)]
pub struct SimpleAccountSdk {
    wait: Option<(Duration, Duration)>,
}

impl SimpleAccountSdk {
    /// Overrides how often and how long the client polls for the user operation receipt
    pub fn with_wait(interval: Duration, timeout: Duration) -> Self {
        Self { wait: Some((interval, timeout)) }
    }
}

#[async_trait]
impl AccountAbstraction<Wallet> for SimpleAccountSdk {
    type Account = SimpleAccount<Provider<Http>>;
    type Client = Client;

    async fn init_account(
        &self,
        signer: Wallet,
        config: &PanelConfig,
    ) -> eyre::Result<Option<Self::Account>> {
        account_or_none(
            SimpleAccount::init(signer, &config.rpc_url, config.entry_point, config.factory).await,
        )
    }

    async fn init_client(&self, config: &PanelConfig) -> eyre::Result<Client> {
        let client = Client::init(&config.rpc_url, config.entry_point).await?;
        Ok(match self.wait {
            Some((interval, timeout)) => client.with_wait(interval, timeout),
            None => client,
        })
    }
}

/// The entry point reverting without a sender address means there is no account for the signer.
/// Transport and decoding failures are errors.
fn account_or_none<M: Middleware + 'static>(
    res: Result<SimpleAccount<M>, ClientError>,
) -> eyre::Result<Option<SimpleAccount<M>>> {
    match res {
        Ok(account) => Ok(Some(account)),
        Err(ClientError::EntryPoint(
            err @ (EntryPointError::NoRevert { .. }
            | EntryPointError::FailedOp(_)
            | EntryPointError::UnexpectedRevert { .. }),
        )) => {
            warn!("Entry point returned no sender address: {err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

impl<M: Middleware + 'static> SmartAccount for SimpleAccount<M> {
    type Call = UserOperationBuilder<M>;

    fn sender(&self) -> Address {
        self.get_sender()
    }

    fn execute(&self, to: Address, value: U256, data: Bytes) -> UserOperationBuilder<M> {
        SimpleAccount::execute(self, to, value, data)
    }
}

#[async_trait]
impl<M: Middleware + 'static> UserOperationClient<UserOperationBuilder<M>> for Client {
    async fn send_user_operation(
        &self,
        call: UserOperationBuilder<M>,
        on_build: OnBuild,
    ) -> eyre::Result<SentOperation> {
        let res = Client::send_user_operation(self, call, SendOptions { on_build: Some(on_build) })
            .await?;

        Ok(SentOperation::new(
            res.user_op_hash,
            async move { Ok(res.wait().await?.map(|receipt| receipt.transaction_hash())) }.boxed(),
        ))
    }
}
