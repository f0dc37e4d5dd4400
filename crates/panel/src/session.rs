use ethers::types::{Address, H256};
use smart_wallet_primitives::UserOperationHash;
use std::sync::Arc;
use tracing::debug;

/// Progress of the transaction carrying a submitted transfer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// User operation accepted, settlement pending
    Waiting,
    /// User operation included in the given transaction
    Included(H256),
    /// The client gave up waiting without reporting a transaction
    Missing,
}

impl TransactionStatus {
    pub fn transaction_hash(&self) -> Option<H256> {
        match self {
            Self::Included(hash) => Some(*hash),
            _ => None,
        }
    }
}

/// Inputs and progress of the transfer dialog
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub recipient: String,
    pub amount: String,
    pub user_op_hash: Option<UserOperationHash>,
    pub transaction: TransactionStatus,
}

/// State transitions of a [WalletSession](WalletSession)
///
/// Actions carrying a `generation` are results of an async flow and are dropped when the signer
/// changed since the flow started.
#[derive(Debug)]
pub enum Action<H> {
    SignerChanged(Option<Address>),
    Initialized { generation: u64, handles: Arc<H>, balance: String },
    AccountUnavailable { generation: u64 },
    Failed { generation: u64, error: String },
    OpenDialog,
    CloseDialog,
    SetRecipient(String),
    SetAmount(String),
    TransferSubmitted { generation: u64, user_op_hash: UserOperationHash },
    TransferSettled { generation: u64, transaction_hash: Option<H256> },
    TransferCompleted { generation: u64, balance: String },
}

/// Panel state owned by a single session
#[derive(Debug)]
pub struct WalletSession<H> {
    signer_address: Option<Address>,
    generation: u64,
    handles: Option<Arc<H>>,
    balance: Option<String>,
    transfer: TransferForm,
    dialog_open: bool,
    error: Option<String>,
}

impl<H> Default for WalletSession<H> {
    fn default() -> Self {
        Self {
            signer_address: None,
            generation: 0,
            handles: None,
            balance: None,
            transfer: TransferForm::default(),
            dialog_open: false,
            error: None,
        }
    }
}

impl<H> WalletSession<H> {
    pub fn signer_address(&self) -> Option<Address> {
        self.signer_address
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn handles(&self) -> Option<&Arc<H>> {
        self.handles.as_ref()
    }

    pub fn balance(&self) -> Option<&str> {
        self.balance.as_deref()
    }

    pub fn transfer(&self) -> &TransferForm {
        &self.transfer
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding result of generation {generation}, current generation is {}",
                self.generation
            );
            return false;
        }
        true
    }

    /// Applies `action` to the session
    ///
    /// Returns `false` if the action was stale and got discarded.
    pub fn reduce(&mut self, action: Action<H>) -> bool {
        match action {
            Action::SignerChanged(signer_address) => {
                self.generation += 1;
                self.signer_address = signer_address;
                self.handles = None;
                self.balance = None;
                self.error = None;
                self.dialog_open = false;
                self.transfer = TransferForm::default();
            }
            Action::Initialized { generation, handles, balance } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.handles = Some(handles);
                self.balance = Some(balance);
                self.error = None;
            }
            Action::AccountUnavailable { generation } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.handles = None;
                self.balance = None;
            }
            Action::Failed { generation, error } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.error = Some(error);
            }
            Action::OpenDialog => {
                self.transfer = TransferForm::default();
                self.error = None;
                self.dialog_open = true;
            }
            Action::CloseDialog => {
                self.transfer = TransferForm::default();
                self.dialog_open = false;
            }
            Action::SetRecipient(recipient) => self.transfer.recipient = recipient,
            Action::SetAmount(amount) => self.transfer.amount = amount,
            Action::TransferSubmitted { generation, user_op_hash } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.transfer.user_op_hash = Some(user_op_hash);
                self.transfer.transaction = TransactionStatus::Waiting;
            }
            Action::TransferSettled { generation, transaction_hash } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.transfer.transaction = match transaction_hash {
                    Some(hash) => TransactionStatus::Included(hash),
                    None => TransactionStatus::Missing,
                };
            }
            Action::TransferCompleted { generation, balance } => {
                if !self.is_current(generation) {
                    return false;
                }
                self.balance = Some(balance);
                self.transfer = TransferForm::default();
                self.dialog_open = false;
            }
        }
        true
    }
}
