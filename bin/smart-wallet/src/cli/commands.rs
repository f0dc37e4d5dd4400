use super::args::{CreateWalletArgs, PanelArgs};
use crate::{
    panel::{create_wallet, run_interactive, show_account, transfer},
    utils::parse_address,
};
use clap::Parser;
use ethers::types::Address;

/// Show the simple account and its balance
#[derive(Debug, Parser)]
pub struct AccountCommand {
    /// All panel args
    #[clap(flatten)]
    panel: PanelArgs,
}

impl AccountCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        show_account(self.panel).await
    }
}

/// Transfer ether from the simple account
#[derive(Debug, Parser)]
pub struct TransferCommand {
    /// All panel args
    #[clap(flatten)]
    panel: PanelArgs,

    /// The recipient address.
    #[clap(long, value_parser=parse_address)]
    to: Address,

    /// The amount in ether (e.g. 0.01).
    #[clap(long)]
    amount: String,
}

impl TransferCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        transfer(self.panel, self.to, self.amount).await
    }
}

/// Start the interactive panel
#[derive(Debug, Parser)]
pub struct InteractiveCommand {
    /// All panel args
    #[clap(flatten)]
    panel: PanelArgs,
}

impl InteractiveCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        run_interactive(self.panel).await
    }
}

/// Create wallet
#[derive(Debug, Parser)]
pub struct CreateWalletCommand {
    /// All create wallet args
    #[clap(flatten)]
    create_wallet: CreateWalletArgs,
}

impl CreateWalletCommand {
    /// Execute the command
    pub fn execute(self) -> eyre::Result<()> {
        create_wallet(self.create_wallet)
    }
}
