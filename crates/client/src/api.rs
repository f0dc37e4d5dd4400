use ethers::types::{Address, U64};
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use smart_wallet_primitives::{
    UserOperationGasEstimation, UserOperationHash, UserOperationReceipt, UserOperationSigned,
};

/// The ERC-4337 `eth` namespace RPC methods exposed by a bundler
#[rpc(client, namespace = "eth")]
pub trait BundlerApi {
    /// Retrieve the current [EIP-155](https://eips.ethereum.org/EIPS/eip-155) chain ID.
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    /// Get the entry points supported by the bundler.
    #[method(name = "supportedEntryPoints")]
    async fn supported_entry_points(&self) -> RpcResult<Vec<String>>;

    /// Send a signed [UserOperation](UserOperationSigned).
    ///
    /// # Returns
    /// * `RpcResult<UserOperationHash>` - The hash of the sent user operation.
    #[method(name = "sendUserOperation")]
    async fn send_user_operation(
        &self,
        user_operation: UserOperationSigned,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash>;

    /// Estimate the gas required for a user operation (signature may be a dummy one).
    #[method(name = "estimateUserOperationGas")]
    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperationSigned,
        entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation>;

    /// Retrieve the receipt of a user operation, or None if it is not included yet.
    #[method(name = "getUserOperationReceipt")]
    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>>;
}
