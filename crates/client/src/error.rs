use smart_wallet_contracts::EntryPointError;
use thiserror::Error;

/// Account abstraction client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Ethereum execution client error
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// Entry point call error
    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    /// Bundler JSON-RPC error
    #[error("bundler error: {0}")]
    Bundler(#[from] jsonrpsee::core::client::Error),

    /// User operation could not be signed
    #[error("signer error: {inner}")]
    Signer {
        /// The inner error message
        inner: String,
    },

    /// The bundler does not support the entry point the account was built for
    #[error("entry point {entry_point} is not supported by the bundler")]
    UnsupportedEntryPoint {
        /// The entry point address
        entry_point: String,
    },
}

impl ClientError {
    pub fn provider<E: std::fmt::Debug>(err: E) -> Self {
        Self::Provider { inner: format!("{err:?}") }
    }
}
