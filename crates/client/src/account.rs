//! Simple account (eth-infinitism reference smart account) owned by a local wallet

use crate::{error::ClientError, provider::create_http_provider};
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{Address, Bytes, U256},
};
use smart_wallet_contracts::{execute_call_data, init_code, EntryPoint};
use smart_wallet_primitives::{
    constants::simple_account::{DUMMY_SIGNATURE, NONCE_KEY, SALT},
    UserOperation, UserOperationSigned, Wallet,
};
use std::{fmt, str::FromStr, sync::Arc};
use tracing::{debug, trace};

/// Verification gas used before the bundler estimation is known
const DEFAULT_VERIFICATION_GAS_LIMIT: u64 = 100_000;
/// Pre-verification gas used before the bundler estimation is known
const DEFAULT_PRE_VERIFICATION_GAS: u64 = 21_000;
/// Call gas used before the bundler estimation is known
const DEFAULT_CALL_GAS_LIMIT: u64 = 35_000;

struct Inner<M: Middleware + 'static> {
    eth_client: Arc<M>,
    wallet: Wallet,
    entry_point: EntryPoint<M>,
    factory: Address,
    init_code: Bytes,
    sender: Address,
}

/// Handle to a simple account: derives its address and builds user operations for it
pub struct SimpleAccount<M: Middleware + 'static> {
    inner: Arc<Inner<M>>,
}

impl<M: Middleware + 'static> Clone for SimpleAccount<M> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<M: Middleware + 'static> fmt::Debug for SimpleAccount<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleAccount")
            .field("sender", &self.inner.sender)
            .field("owner", &self.inner.wallet.address())
            .field("entry_point", &self.inner.entry_point.address())
            .field("factory", &self.inner.factory)
            .finish()
    }
}

impl SimpleAccount<Provider<Http>> {
    /// Connects to `rpc_url` and initializes the simple account owned by `wallet`
    pub async fn init(
        wallet: Wallet,
        rpc_url: &str,
        entry_point: Address,
        factory: Address,
    ) -> Result<Self, ClientError> {
        let eth_client = Arc::new(create_http_provider(rpc_url).await?);
        Self::new(eth_client, wallet, entry_point, factory).await
    }
}

impl<M: Middleware + 'static> SimpleAccount<M> {
    /// Initializes the simple account owned by `wallet`.
    ///
    /// The sender is the counterfactual address returned by the entry point for the factory init
    /// code, so it is known before the account is deployed.
    pub async fn new(
        eth_client: Arc<M>,
        wallet: Wallet,
        entry_point: Address,
        factory: Address,
    ) -> Result<Self, ClientError> {
        let entry_point = EntryPoint::new(eth_client.clone(), entry_point);
        let init_code = init_code(factory, wallet.address(), U256::from(SALT));
        let sender = entry_point.get_sender_address(init_code.clone()).await?.sender;

        debug!("Simple account {sender:?} owned by {:?}", wallet.address());

        Ok(Self {
            inner: Arc::new(Inner { eth_client, wallet, entry_point, factory, init_code, sender }),
        })
    }

    /// Address of the smart account
    pub fn get_sender(&self) -> Address {
        self.inner.sender
    }

    /// Address of the externally-owned account controlling the smart account
    pub fn owner(&self) -> Address {
        self.inner.wallet.address()
    }

    pub fn entry_point(&self) -> Address {
        self.inner.entry_point.address()
    }

    pub fn factory(&self) -> Address {
        self.inner.factory
    }

    pub fn eth_client(&self) -> Arc<M> {
        self.inner.eth_client.clone()
    }

    /// Init code deploying the account (prepended to the first user operation only)
    pub fn init_code(&self) -> Bytes {
        self.inner.init_code.clone()
    }

    /// Returns true if the account contract already exists on-chain
    pub async fn is_deployed(&self) -> Result<bool, ClientError> {
        let code = self
            .inner
            .eth_client
            .get_code(self.inner.sender, None)
            .await
            .map_err(ClientError::provider)?;
        Ok(!code.is_empty())
    }

    /// Current nonce of the account in the transfer nonce sequence
    pub async fn nonce(&self) -> Result<U256, ClientError> {
        Ok(self.inner.entry_point.get_nonce(&self.inner.sender, U256::from(NONCE_KEY)).await?)
    }

    /// Starts a user operation calling `execute(to, value, data)` on the account
    pub fn execute(&self, to: Address, value: U256, data: Bytes) -> UserOperationBuilder<M> {
        UserOperationBuilder {
            account: self.clone(),
            call_data: execute_call_data(to, value, data),
        }
    }

    /// Signs the user operation with the owner's key
    pub async fn sign(
        &self,
        uo: &UserOperationSigned,
        chain_id: u64,
    ) -> Result<UserOperation, ClientError> {
        self.inner
            .wallet
            .sign_user_operation(uo, &self.entry_point(), chain_id)
            .await
            .map_err(|e| ClientError::Signer { inner: e.to_string() })
    }
}

/// User operation under construction for a [SimpleAccount](SimpleAccount)
#[derive(Clone, Debug)]
pub struct UserOperationBuilder<M: Middleware + 'static> {
    account: SimpleAccount<M>,
    call_data: Bytes,
}

impl<M: Middleware + 'static> UserOperationBuilder<M> {
    pub fn account(&self) -> &SimpleAccount<M> {
        &self.account
    }

    pub fn call_data(&self) -> &Bytes {
        &self.call_data
    }

    /// Fills sender, nonce, init code and fees. Gas limits are placeholders and the signature is
    /// the dummy one until the operation is estimated and signed.
    pub async fn prepare(&self) -> Result<UserOperationSigned, ClientError> {
        let nonce = self.account.nonce().await?;
        let init_code = if self.account.is_deployed().await? {
            Bytes::default()
        } else {
            self.account.init_code()
        };

        let (max_fee_per_gas, max_priority_fee_per_gas) = self
            .account
            .eth_client()
            .estimate_eip1559_fees(None)
            .await
            .map_err(ClientError::provider)?;

        let uo = UserOperationSigned::default()
            .sender(self.account.get_sender())
            .nonce(nonce)
            .init_code(init_code)
            .call_data(self.call_data.clone())
            .call_gas_limit(DEFAULT_CALL_GAS_LIMIT.into())
            .verification_gas_limit(DEFAULT_VERIFICATION_GAS_LIMIT.into())
            .pre_verification_gas(DEFAULT_PRE_VERIFICATION_GAS.into())
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(max_priority_fee_per_gas)
            .signature(dummy_signature());
        trace!("Prepared user operation {uo:?}");

        Ok(uo)
    }
}

fn dummy_signature() -> Bytes {
    Bytes::from_str(DUMMY_SIGNATURE).unwrap_or_default()
}
