use crate::utils::run_until_ctrl_c;
use clap::{value_parser, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod commands;

/// Crates logging at the level selected with `--verbosity`
const LOG_TARGETS: [&str; 5] = [
    "smart_wallet",
    "smart_wallet_client",
    "smart_wallet_contracts",
    "smart_wallet_panel",
    "smart_wallet_primitives",
];

/// The main smart wallet CLI interface
#[derive(Debug, Parser)]
#[command(author, version, about = "Smart wallet", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,

    /// The verbosity level
    #[clap(
        long,
        short,
        global = true,
        default_value_t = 2,
        value_parser = value_parser!(u8).range(..=4)
    )]
    verbosity: u8,
}

impl Cli {
    /// Get the log level based on the verbosity level
    pub fn get_log_level(&self) -> String {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
        .into()
    }

    /// Log filter directives: `RUST_LOG` followed by the workspace crates at the selected level
    pub fn get_log_filter(&self, rust_log: Option<String>) -> String {
        let level = self.get_log_level();
        let crates = LOG_TARGETS.map(|target| format!("{target}={level}")).join(",");
        match rust_log {
            Some(val) if !val.is_empty() => format!("{val},{crates}"),
            _ => crates,
        }
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the simple account of the signer and its balance
    #[command(name = "account")]
    Account(commands::AccountCommand),

    /// Transfer ether from the simple account with a user operation
    #[command(name = "transfer")]
    Transfer(commands::TransferCommand),

    /// Start the interactive panel reading commands from stdin
    #[command(name = "interactive")]
    Interactive(commands::InteractiveCommand),

    /// Create wallet (mnemonic) for the signer
    #[command(name = "create-wallet")]
    CreateWallet(commands::CreateWalletCommand),
}

pub fn run() -> eyre::Result<()> {
    let cli = Cli::parse();

    let filter = cli.get_log_filter(std::env::var("RUST_LOG").ok());
    tracing_subscriber::fmt().with_env_filter(EnvFilter::new(filter)).init();

    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    let task = async move {
        match cli.command {
            Commands::Account(command) => command.execute().await,
            Commands::Transfer(command) => command.execute().await,
            Commands::Interactive(command) => command.execute().await,
            Commands::CreateWallet(command) => command.execute(),
        }
    };

    rt.block_on(run_until_ctrl_c(task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_to_log_filter() {
        let cli = Cli::try_parse_from(["smart-wallet", "create-wallet", "-v", "3"]).unwrap();
        assert_eq!(cli.get_log_level(), "debug");

        let filter = cli.get_log_filter(Some("jsonrpsee=warn".into()));
        assert!(filter.starts_with("jsonrpsee=warn,smart_wallet=debug,"));
        assert!(filter.ends_with("smart_wallet_primitives=debug"));
        assert_eq!(cli.get_log_filter(None).split(',').count(), LOG_TARGETS.len());
    }

    #[test]
    fn verbosity_is_bounded() {
        assert!(Cli::try_parse_from(["smart-wallet", "create-wallet", "-v", "5"]).is_err());
    }

    #[test]
    fn transfer_command() {
        let cli = Cli::try_parse_from([
            "smart-wallet",
            "transfer",
            "--to",
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "--amount",
            "0.01",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Transfer(_)));
        assert_eq!(cli.verbosity, 2);
    }
}
