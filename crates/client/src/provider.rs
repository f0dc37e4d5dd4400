//! Utils for creating ethers providers and bundler clients

use crate::error::ClientError;
use ethers::{
    providers::{Http, Middleware, Provider},
    types::Chain,
};
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::time::Duration;

/// Creates ethers provider with HTTP connection
pub async fn create_http_provider(addr: &str) -> Result<Provider<Http>, ClientError> {
    let provider = Provider::<Http>::try_from(addr).map_err(ClientError::provider)?;

    let chain_id = provider.get_chainid().await.map_err(ClientError::provider)?;

    Ok(provider.interval(if chain_id == Chain::Dev.into() {
        Duration::from_millis(5u64)
    } else {
        Duration::from_millis(500u64)
    }))
}

/// Creates JSON-RPC client talking to the bundler
pub fn create_bundler_client(addr: &str) -> Result<HttpClient, ClientError> {
    Ok(HttpClientBuilder::default().build(addr)?)
}
