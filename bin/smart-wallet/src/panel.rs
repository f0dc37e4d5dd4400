use crate::{
    cli::args::{CreateWalletArgs, PanelArgs},
    utils::{parse_address, unwrap_path_or_home},
};
use ethers::{
    providers::{Http, Middleware, Provider},
    types::Address,
};
use smart_wallet_client::provider::create_http_provider;
use smart_wallet_panel::{
    sdk::{LocalWalletProvider, SimpleAccountSdk},
    WalletPanel,
};
use smart_wallet_primitives::Wallet;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

const COMMANDS: &str = "signer, open, close, recipient, amount, confirm, show, quit";

pub type Panel = WalletPanel<LocalWalletProvider<Provider<Http>>, SimpleAccountSdk>;

/// Builds the panel and returns it with the signer to connect
pub async fn build_panel(args: &PanelArgs) -> eyre::Result<(Panel, Option<Address>)> {
    let sdk = SimpleAccountSdk::with_wait(args.wait_interval(), args.wait_timeout());

    if args.mnemonic_file.is_none() && args.private_key.is_none() {
        info!("No mnemonic file or private key provided, wallet is not connected");
        return Ok((WalletPanel::new(None, sdk, args.config()), args.signer));
    }

    let eth_client = Arc::new(create_http_provider(&args.rpc_url).await?);
    let chain_id = eth_client.get_chainid().await?.as_u64();
    let wallet = match (&args.private_key, &args.mnemonic_file) {
        (Some(key), _) => Wallet::from_private_key(key, chain_id)?,
        (None, Some(path)) => Wallet::from_file(path.clone(), args.account_index, chain_id)?,
        (None, None) => return Err(eyre::eyre!("No wallet source")),
    };
    info!("Wallet signer {:?} (chain id {chain_id})", wallet.address());

    let signer = args.signer.unwrap_or_else(|| wallet.address());
    let provider = LocalWalletProvider::new(eth_client, vec![wallet]);

    Ok((WalletPanel::new(Some(provider), sdk, args.config()), Some(signer)))
}

/// Connects `signer` and prints the panel
pub async fn show_account(args: PanelArgs) -> eyre::Result<()> {
    let (panel, signer) = build_panel(&args).await?;
    panel.set_signer(signer).await?;
    println!("{}", panel.view());
    Ok(())
}

/// Transfers `amount` ether from the simple account of the signer to `to`
pub async fn transfer(args: PanelArgs, to: Address, amount: String) -> eyre::Result<()> {
    let (panel, signer) = build_panel(&args).await?;
    panel.set_signer(signer).await?;

    panel.open_dialog();
    panel.set_recipient(format!("{to:?}"));
    panel.set_amount(amount);
    println!("{}", panel.view());

    panel.submit_transfer().await?;
    println!("{}", panel.view());
    Ok(())
}

/// Line-oriented panel reading commands from stdin
pub async fn run_interactive(args: PanelArgs) -> eyre::Result<()> {
    let (panel, signer) = build_panel(&args).await?;
    if let Err(err) = panel.set_signer(signer).await {
        debug!("Initialization failed: {err}");
    }
    println!("{}", panel.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let (command, arg) = match line.trim().split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" | "show" => {}
            "signer" => {
                let signer = match arg {
                    "" | "none" => None,
                    arg => match parse_address(arg) {
                        Ok(address) => Some(address),
                        Err(err) => {
                            warn!("{err}");
                            continue;
                        }
                    },
                };
                if let Err(err) = panel.set_signer(signer).await {
                    debug!("Initialization failed: {err}");
                }
            }
            "open" => panel.open_dialog(),
            "close" => panel.close_dialog(),
            "recipient" => panel.set_recipient(arg),
            "amount" => panel.set_amount(arg),
            "confirm" => {
                if let Err(err) = panel.submit_transfer().await {
                    debug!("Transfer failed: {err}");
                }
            }
            "quit" | "exit" => break,
            command => {
                warn!("Unknown command {command:?}, expected one of: {COMMANDS}");
                continue;
            }
        }

        println!("{}", panel.view());
    }

    Ok(())
}

pub fn create_wallet(args: CreateWalletArgs) -> eyre::Result<()> {
    let path = unwrap_path_or_home(args.output_path)?;
    info!("Creating wallet... Storing to: {:?}", path);

    let wallet = Wallet::build_random(path, args.chain_id)?;
    info!("Wallet signer {:?}", wallet.address());

    Ok(())
}
