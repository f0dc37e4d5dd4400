use thiserror::Error;

/// Wallet panel errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// The wallet provider could not derive a signer for the signer address
    #[error("signer error: {inner}")]
    Signer {
        /// The inner error message
        inner: String,
    },

    /// The smart account or client handle could not be built
    #[error("account error: {inner}")]
    Account {
        /// The inner error message
        inner: String,
    },

    /// The balance could not be queried or formatted
    #[error("balance error: {inner}")]
    Balance {
        /// The inner error message
        inner: String,
    },

    /// The recipient is not an address
    #[error("invalid recipient {recipient:?}")]
    InvalidRecipient {
        /// The rejected input
        recipient: String,
    },

    /// The amount is not a valid ether amount
    #[error("invalid amount: {inner}")]
    InvalidAmount {
        /// The inner error message
        inner: String,
    },

    /// The user operation could not be built or sent
    #[error("submission error: {inner}")]
    Submission {
        /// The inner error message
        inner: String,
    },

    /// Waiting for the user operation to be included failed
    #[error("settlement error: {inner}")]
    Settlement {
        /// The inner error message
        inner: String,
    },

    /// A transfer was requested while the transfer dialog is closed
    #[error("transfer dialog is not open")]
    DialogClosed,

    /// A transfer was requested before the smart account was initialized
    #[error("smart account is not initialized")]
    NotInitialized,
}

impl PanelError {
    pub fn signer(err: eyre::Report) -> Self {
        Self::Signer { inner: format!("{err:#}") }
    }

    pub fn account(err: eyre::Report) -> Self {
        Self::Account { inner: format!("{err:#}") }
    }

    pub fn balance(err: eyre::Report) -> Self {
        Self::Balance { inner: format!("{err:#}") }
    }

    pub fn submission(err: eyre::Report) -> Self {
        Self::Submission { inner: format!("{err:#}") }
    }

    pub fn settlement(err: eyre::Report) -> Self {
        Self::Settlement { inner: format!("{err:#}") }
    }
}
