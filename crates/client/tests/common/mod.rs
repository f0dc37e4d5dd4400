use async_trait::async_trait;
use ethers::types::{Address, TransactionReceipt, H256, U256, U64};
use jsonrpsee::{
    core::RpcResult,
    proc_macros::rpc,
    server::{ServerBuilder, ServerHandle},
};
use parking_lot::Mutex;
use smart_wallet_primitives::{
    UserOperationGasEstimation, UserOperationHash, UserOperationReceipt, UserOperationSigned,
};
use std::sync::Arc;

pub const CHAIN_ID: u64 = 1337;
pub const ENTRY_POINT: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";

#[rpc(server, namespace = "eth")]
pub trait MockBundlerApi {
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    #[method(name = "supportedEntryPoints")]
    async fn supported_entry_points(&self) -> RpcResult<Vec<String>>;

    #[method(name = "sendUserOperation")]
    async fn send_user_operation(
        &self,
        user_operation: UserOperationSigned,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash>;

    #[method(name = "estimateUserOperationGas")]
    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperationSigned,
        entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation>;

    #[method(name = "getUserOperationReceipt")]
    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>>;
}

#[derive(Default)]
pub struct MockBundlerState {
    /// Receipt lookups answered with `null` before the receipt shows up (`None` = never)
    pub receipt_after: Option<usize>,
    pub receipt_polls: usize,
    pub sent: Vec<UserOperationSigned>,
    pub estimated: Vec<UserOperationSigned>,
}

#[derive(Clone, Default)]
pub struct MockBundler {
    pub state: Arc<Mutex<MockBundlerState>>,
}

impl MockBundler {
    pub fn with_receipt_after(polls: Option<usize>) -> Self {
        let bundler = Self::default();
        bundler.state.lock().receipt_after = polls;
        bundler
    }
}

pub fn transaction_hash() -> H256 {
    H256::repeat_byte(0xab)
}

#[async_trait]
impl MockBundlerApiServer for MockBundler {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(CHAIN_ID.into())
    }

    async fn supported_entry_points(&self) -> RpcResult<Vec<String>> {
        Ok(vec![ENTRY_POINT.into()])
    }

    async fn send_user_operation(
        &self,
        user_operation: UserOperationSigned,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash> {
        let hash = user_operation.hash(&entry_point, CHAIN_ID);
        self.state.lock().sent.push(user_operation);
        Ok(hash)
    }

    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperationSigned,
        _entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation> {
        self.state.lock().estimated.push(user_operation);
        Ok(UserOperationGasEstimation {
            pre_verification_gas: 44_980.into(),
            verification_gas_limit: 361_460.into(),
            call_gas_limit: 33_100.into(),
        })
    }

    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>> {
        let mut state = self.state.lock();
        state.receipt_polls += 1;

        match state.receipt_after {
            Some(after) if state.receipt_polls > after => Ok(Some(UserOperationReceipt {
                user_operation_hash,
                sender: Address::repeat_byte(0x11),
                nonce: U256::zero(),
                paymaster: None,
                actual_gas_cost: 1_000.into(),
                actual_gas_used: 100.into(),
                success: true,
                reason: String::new(),
                logs: vec![],
                tx_receipt: TransactionReceipt {
                    transaction_hash: transaction_hash(),
                    ..Default::default()
                },
            })),
            _ => Ok(None),
        }
    }
}

/// Starts the mock bundler on a random local port and returns its URL
pub async fn start_mock_bundler(bundler: MockBundler) -> eyre::Result<(String, ServerHandle)> {
    let server = ServerBuilder::default().build("127.0.0.1:0").await?;
    let addr = server.local_addr()?;
    let handle = server.start(bundler.into_rpc());
    Ok((format!("http://{addr}"), handle))
}
