use crate::{
    error::{decode_revert_error, EntryPointError},
    gen::{entry_point_api::EntryPointAPIErrors, EntryPointAPI, SenderAddressResult},
};
use ethers::{
    prelude::ContractError,
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use std::sync::Arc;
use tracing::trace;

#[derive(Clone)]
pub struct EntryPoint<M: Middleware + 'static> {
    eth_client: Arc<M>,
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        let entry_point_api = EntryPointAPI::new(address, eth_client.clone());
        Self { eth_client, address, entry_point_api }
    }

    pub fn entry_point_api(&self) -> &EntryPointAPI<M> {
        &self.entry_point_api
    }

    pub fn eth_client(&self) -> Arc<M> {
        self.eth_client.clone()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn deserialize_error_msg(
        err: ContractError<M>,
    ) -> Result<EntryPointAPIErrors, EntryPointError> {
        trace!("Entry point call reverted: {err:?}");
        match err {
            ContractError::DecodingError(e) => {
                Err(EntryPointError::Decode { inner: e.to_string() })
            }
            ContractError::AbiError(e) => Err(EntryPointError::ABI { inner: e.to_string() }),
            ContractError::MiddlewareError { e } => EntryPointError::from_middleware_error::<M>(e),
            ContractError::ProviderError { e } => EntryPointError::from_provider_error(&e),
            ContractError::Revert(data) => decode_revert_error(data),
            _ => Err(EntryPointError::Other { inner: err.to_string() }),
        }
    }

    /// Nonce of `address` in the sequence identified by `key`
    pub async fn get_nonce(&self, address: &Address, key: U256) -> Result<U256, EntryPointError> {
        self.entry_point_api
            .get_nonce(*address, key)
            .call()
            .await
            .map_err(|err| EntryPointError::Other { inner: format!("get nonce error: {err:?}") })
    }

    /// Counterfactual sender address for the given init code.
    ///
    /// The entry point always reverts with `SenderAddressResult`, a successful call is an error.
    pub async fn get_sender_address(
        &self,
        init_code: Bytes,
    ) -> Result<SenderAddressResult, EntryPointError> {
        let res = self.entry_point_api.get_sender_address(init_code).call().await;

        match res {
            Ok(_) => Err(EntryPointError::NoRevert { function: "get_sender_address".into() }),
            Err(e) => Self::deserialize_error_msg(e).and_then(|op| match op {
                EntryPointAPIErrors::SenderAddressResult(res) => Ok(res),
                EntryPointAPIErrors::FailedOp(err) => Err(EntryPointError::FailedOp(err)),
                _ => Err(EntryPointError::UnexpectedRevert {
                    function: "get_sender_address".into(),
                    inner: format!("{op:?}"),
                }),
            }),
        }
    }
}
