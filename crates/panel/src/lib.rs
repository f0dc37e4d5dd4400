//! Smart wallet panel
//!
//! Holds the state of a wallet session (signer, simple account, balance, transfer dialog) and
//! drives the asynchronous calls to the wallet provider and the account abstraction client.
//! Every async flow is tagged with the generation of the signer it started for, results of a
//! flow that was overtaken by a signer change are discarded.

mod config;
mod error;
mod panel;
pub mod sdk;
mod session;
mod traits;
mod view;

#[cfg(test)]
mod test_utils;

pub use config::PanelConfig;
pub use error::PanelError;
pub use panel::{SessionHandles, WalletPanel};
pub use session::{Action, TransactionStatus, TransferForm, WalletSession};
pub use traits::{
    AccountAbstraction, SentOperation, Settlement, SmartAccount, UserOperationClient,
    WalletProvider,
};
pub use view::{AccountView, TransferDialogView, View};
