use crate::{
    account::UserOperationBuilder,
    api::BundlerApiClient,
    error::ClientError,
    provider::create_bundler_client,
};
use ethers::{providers::Middleware, types::Address};
use jsonrpsee::http_client::HttpClient;
use smart_wallet_primitives::{
    constants::settlement::{WAIT_INTERVAL_MS, WAIT_TIMEOUT_MS},
    UserOperation, UserOperationGasEstimation, UserOperationHash, UserOperationReceipt,
    UserOperationSigned,
};
use std::{fmt, time::Duration};
use tokio::time::{sleep, Instant};
use tracing::{debug, trace, warn};

/// Callback invoked with the signed user operation right before it is sent
pub type OnBuild = Box<dyn FnOnce(&UserOperation) + Send>;

/// Options of [Client::send_user_operation](Client::send_user_operation)
#[derive(Default)]
pub struct SendOptions {
    /// Called once the user operation is estimated and signed
    pub on_build: Option<OnBuild>,
}

impl SendOptions {
    pub fn on_build<F>(f: F) -> Self
    where
        F: FnOnce(&UserOperation) + Send + 'static,
    {
        Self { on_build: Some(Box::new(f)) }
    }
}

impl fmt::Debug for SendOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendOptions").field("on_build", &self.on_build.is_some()).finish()
    }
}

/// Client submitting user operations to a bundler for one entry point
#[derive(Clone, Debug)]
pub struct Client {
    bundler: HttpClient,
    entry_point: Address,
    chain_id: u64,
    wait_interval: Duration,
    wait_timeout: Duration,
}

impl Client {
    /// Connects to the bundler at `rpc_url`, checks that it supports `entry_point` and reads its
    /// chain id
    pub async fn init(rpc_url: &str, entry_point: Address) -> Result<Self, ClientError> {
        let bundler = create_bundler_client(rpc_url)?;

        let supported = bundler.supported_entry_points().await?;
        if !supported.iter().any(|ep| ep.parse::<Address>().is_ok_and(|ep| ep == entry_point)) {
            return Err(ClientError::UnsupportedEntryPoint {
                entry_point: format!("{entry_point:?}"),
            });
        }

        let chain_id = bundler.chain_id().await?.as_u64();
        Ok(Self::new(bundler, entry_point, chain_id))
    }

    pub fn new(bundler: HttpClient, entry_point: Address, chain_id: u64) -> Self {
        Self {
            bundler,
            entry_point,
            chain_id,
            wait_interval: Duration::from_millis(WAIT_INTERVAL_MS),
            wait_timeout: Duration::from_millis(WAIT_TIMEOUT_MS),
        }
    }

    /// Overrides how often and how long [wait](SendUserOperationResponse::wait) polls for the
    /// receipt
    pub fn with_wait(mut self, interval: Duration, timeout: Duration) -> Self {
        self.wait_interval = interval;
        self.wait_timeout = timeout;
        self
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Prepares, estimates and signs the user operation without sending it
    pub async fn build_user_operation<M: Middleware + 'static>(
        &self,
        builder: &UserOperationBuilder<M>,
    ) -> Result<UserOperation, ClientError> {
        if builder.account().entry_point() != self.entry_point {
            warn!(
                "Account was built for entry point {:?}, client uses {:?}",
                builder.account().entry_point(),
                self.entry_point
            );
        }

        let uo = builder.prepare().await?;
        let estimation =
            self.bundler.estimate_user_operation_gas(uo.clone(), self.entry_point).await?;
        trace!("Gas estimation {estimation:?}");

        builder.account().sign(&apply_gas_estimation(uo, estimation), self.chain_id).await
    }

    /// Builds the user operation, hands it to `on_build` and sends it to the bundler.
    ///
    /// The returned response carries the user operation hash immediately; settlement is awaited
    /// separately with [wait](SendUserOperationResponse::wait).
    pub async fn send_user_operation<M: Middleware + 'static>(
        &self,
        builder: UserOperationBuilder<M>,
        opts: SendOptions,
    ) -> Result<SendUserOperationResponse, ClientError> {
        let uo = self.build_user_operation(&builder).await?;

        if let Some(on_build) = opts.on_build {
            on_build(&uo);
        }

        let user_op_hash =
            self.bundler.send_user_operation(uo.user_operation.clone(), self.entry_point).await?;
        if user_op_hash != uo.hash {
            warn!("Bundler returned hash {user_op_hash} for user operation {}", uo.hash);
        }
        debug!("User operation {user_op_hash} sent to the bundler");

        Ok(SendUserOperationResponse {
            user_op_hash,
            bundler: self.bundler.clone(),
            wait_interval: self.wait_interval,
            wait_timeout: self.wait_timeout,
        })
    }
}

/// Applies the bundler gas estimation to a prepared user operation
pub fn apply_gas_estimation(
    uo: UserOperationSigned,
    estimation: UserOperationGasEstimation,
) -> UserOperationSigned {
    uo.pre_verification_gas(estimation.pre_verification_gas)
        .verification_gas_limit(estimation.verification_gas_limit)
        .call_gas_limit(estimation.call_gas_limit)
}

/// A user operation accepted by the bundler
#[derive(Clone, Debug)]
pub struct SendUserOperationResponse {
    pub user_op_hash: UserOperationHash,
    bundler: HttpClient,
    wait_interval: Duration,
    wait_timeout: Duration,
}

impl SendUserOperationResponse {
    /// Waits until the user operation is included on-chain. Resolves to `None` if no receipt
    /// shows up before the timeout.
    pub async fn wait(&self) -> Result<Option<UserOperationReceipt>, ClientError> {
        wait_for_receipt(&self.bundler, self.user_op_hash, self.wait_interval, self.wait_timeout)
            .await
    }
}

/// Polls `eth_getUserOperationReceipt` every `interval` until a receipt is returned or `timeout`
/// elapses
pub async fn wait_for_receipt<C>(
    client: &C,
    user_op_hash: UserOperationHash,
    interval: Duration,
    timeout: Duration,
) -> Result<Option<UserOperationReceipt>, ClientError>
where
    C: BundlerApiClient + Sync,
{
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(receipt) = client.get_user_operation_receipt(user_op_hash).await? {
            debug!("User operation {user_op_hash} included in {:?}", receipt.transaction_hash());
            return Ok(Some(receipt));
        }

        if Instant::now() + interval > deadline {
            debug!("No receipt for user operation {user_op_hash} after {timeout:?}");
            return Ok(None);
        }
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::U256;

    #[test]
    fn gas_estimation_overrides_placeholders() {
        let uo = UserOperationSigned::random().call_gas_limit(1.into());
        let estimation = UserOperationGasEstimation {
            pre_verification_gas: 44_980.into(),
            verification_gas_limit: 361_460.into(),
            call_gas_limit: 33_100.into(),
        };

        let uo = apply_gas_estimation(uo, estimation);
        assert_eq!(uo.pre_verification_gas, U256::from(44_980));
        assert_eq!(uo.verification_gas_limit, U256::from(361_460));
        assert_eq!(uo.call_gas_limit, U256::from(33_100));
    }

    #[test]
    fn send_options_debug_hides_callback() {
        let opts = SendOptions::on_build(|_| {});
        assert_eq!(format!("{opts:?}"), "SendOptions { on_build: true }");
        assert!(SendOptions::default().on_build.is_none());
    }
}
