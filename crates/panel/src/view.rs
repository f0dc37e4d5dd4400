use crate::{
    panel::SessionHandles,
    session::{TransactionStatus, WalletSession},
};
use ethers::types::Address;
use smart_wallet_primitives::constants::units::ETHER_SYMBOL;
use std::fmt;

const CONNECT_PROMPT: &str = "Connect wallet to view Simple Account Address";
const DIALOG_TITLE: &str = "Transfer Modal";
const WAITING: &str = "Waiting for transaction...";

/// Snapshot of what the panel displays
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// No smart account yet
    ConnectWallet { error: Option<String> },
    Account(AccountView),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountView {
    pub address: Address,
    pub balance: String,
    pub dialog: Option<TransferDialogView>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferDialogView {
    pub recipient: String,
    pub amount: String,
    pub user_op_hash: String,
    pub transaction_hash: String,
}

impl View {
    pub(crate) fn render<A, C>(session: &WalletSession<SessionHandles<A, C>>) -> Self {
        let error = session.error().map(str::to_owned);
        let Some(handles) = session.handles() else {
            return Self::ConnectWallet { error };
        };

        let dialog = session.dialog_open().then(|| {
            let transfer = session.transfer();
            TransferDialogView {
                recipient: transfer.recipient.clone(),
                amount: transfer.amount.clone(),
                user_op_hash: transfer.user_op_hash.map(|h| h.to_string()).unwrap_or_default(),
                transaction_hash: match transfer.transaction {
                    TransactionStatus::Waiting => WAITING.to_owned(),
                    TransactionStatus::Included(hash) => format!("{hash:?}"),
                    TransactionStatus::Idle | TransactionStatus::Missing => String::new(),
                },
            }
        });

        Self::Account(AccountView {
            address: handles.address,
            balance: session.balance().unwrap_or_default().to_owned(),
            dialog,
            error,
        })
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::ConnectWallet { error } => {
                writeln!(f, "{CONNECT_PROMPT}")?;
                if let Some(error) = error {
                    writeln!(f, "Error: {error}")?;
                }
            }
            View::Account(account) => {
                writeln!(f, "Simple Account Address: {:?}", account.address)?;
                writeln!(f, "Balance: {} {ETHER_SYMBOL}", account.balance)?;
                if let Some(dialog) = &account.dialog {
                    writeln!(f, "{DIALOG_TITLE}")?;
                    writeln!(f, "  Recipient: {}", dialog.recipient)?;
                    writeln!(f, "  Amount: {}", dialog.amount)?;
                    writeln!(f, "  UserOpHash: {}", dialog.user_op_hash)?;
                    writeln!(f, "  Transaction Hash: {}", dialog.transaction_hash)?;
                }
                if let Some(error) = &account.error {
                    writeln!(f, "Error: {error}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Action;
    use ethers::types::H256;
    use smart_wallet_primitives::UserOperationHash;
    use std::sync::Arc;

    type Session = WalletSession<SessionHandles<(), ()>>;

    fn session() -> (Session, u64) {
        let mut session = Session::default();
        session.reduce(Action::SignerChanged(Some(Address::repeat_byte(1))));
        let generation = session.generation();
        session.reduce(Action::Initialized {
            generation,
            handles: Arc::new(SessionHandles {
                address: Address::repeat_byte(0x11),
                account: (),
                client: (),
            }),
            balance: "1.5".into(),
        });
        (session, generation)
    }

    #[test]
    fn connect_prompt() {
        let view = View::render(&Session::default());
        assert_eq!(view, View::ConnectWallet { error: None });
        assert_eq!(view.to_string(), "Connect wallet to view Simple Account Address\n");
    }

    #[test]
    fn account_and_dialog() {
        let (mut session, generation) = session();
        assert_eq!(
            View::render(&session).to_string(),
            "Simple Account Address: 0x1111111111111111111111111111111111111111\nBalance: 1.5 ETH\n"
        );

        session.reduce(Action::OpenDialog);
        session.reduce(Action::SetAmount("0.2".into()));
        session.reduce(Action::TransferSubmitted {
            generation,
            user_op_hash: UserOperationHash::from(H256::repeat_byte(0x22)),
        });
        let View::Account(view) = View::render(&session) else { panic!("expected account view") };
        let dialog = view.dialog.unwrap();
        assert_eq!(dialog.amount, "0.2");
        assert_eq!(dialog.user_op_hash, format!("{:?}", H256::repeat_byte(0x22)));
        assert_eq!(dialog.transaction_hash, "Waiting for transaction...");

        session.reduce(Action::TransferSettled { generation, transaction_hash: None });
        let rendered = View::render(&session).to_string();
        assert!(rendered.contains("Transfer Modal\n"));
        assert!(rendered.ends_with("  Transaction Hash: \n"));
    }
}
