use crate::{
    config::PanelConfig,
    error::PanelError,
    session::{Action, WalletSession},
    traits::{AccountAbstraction, SmartAccount, UserOperationClient, WalletProvider},
    view::View,
};
use ethers::types::{Address, Bytes, H256};
use parking_lot::Mutex;
use smart_wallet_client::OnBuild;
use smart_wallet_primitives::units::{format_ether, parse_ether};
use std::{fmt, sync::Arc};
use tracing::{debug, error, info};

/// Handles built for the current signer
pub struct SessionHandles<A, C> {
    /// Smart account address
    pub address: Address,
    pub account: A,
    pub client: C,
}

impl<A, C> fmt::Debug for SessionHandles<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandles").field("address", &self.address).finish()
    }
}

type Handles<P, S> = SessionHandles<
    <S as AccountAbstraction<<P as WalletProvider>::Signer>>::Account,
    <S as AccountAbstraction<<P as WalletProvider>::Signer>>::Client,
>;

/// Wallet panel
///
/// Cloning the panel yields another handle to the same session.
pub struct WalletPanel<P, S>
where
    P: WalletProvider,
    S: AccountAbstraction<P::Signer>,
{
    provider: Option<Arc<P>>,
    sdk: Arc<S>,
    config: PanelConfig,
    session: Arc<Mutex<WalletSession<Handles<P, S>>>>,
}

impl<P, S> Clone for WalletPanel<P, S>
where
    P: WalletProvider,
    S: AccountAbstraction<P::Signer>,
{
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            sdk: self.sdk.clone(),
            config: self.config.clone(),
            session: self.session.clone(),
        }
    }
}

impl<P, S> WalletPanel<P, S>
where
    P: WalletProvider,
    S: AccountAbstraction<P::Signer>,
{
    /// Creates a new panel. Without a wallet provider the panel stays uninitialized and only
    /// renders the connect prompt.
    pub fn new(provider: Option<P>, sdk: S, config: PanelConfig) -> Self {
        Self {
            provider: provider.map(Arc::new),
            sdk: Arc::new(sdk),
            config,
            session: Arc::new(Mutex::new(WalletSession::default())),
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    fn dispatch(&self, action: Action<Handles<P, S>>) -> bool {
        self.session.lock().reduce(action)
    }

    fn fail(&self, generation: u64, err: PanelError) -> PanelError {
        error!("{err}");
        self.dispatch(Action::Failed { generation, error: err.to_string() });
        err
    }

    /// Runs `f` against the current session state
    pub fn with_session<R>(&self, f: impl FnOnce(&WalletSession<Handles<P, S>>) -> R) -> R {
        f(&self.session.lock())
    }

    /// Current smart account address
    pub fn account_address(&self) -> Option<Address> {
        self.session.lock().handles().map(|h| h.address)
    }

    /// Renders the current state
    pub fn view(&self) -> View {
        View::render(&self.session.lock())
    }

    /// Switches the session to `signer` and initializes the smart account, client and balance for
    /// it. Results are only applied if no other signer change happened in the meantime.
    pub async fn set_signer(&self, signer: Option<Address>) -> Result<(), PanelError> {
        self.dispatch(Action::SignerChanged(signer));
        let generation = self.session.lock().generation();

        let Some(address) = signer else {
            debug!("Signer disconnected");
            return Ok(());
        };
        let Some(provider) = self.provider.clone() else {
            debug!("No wallet provider, skipping initialization for signer {address:?}");
            return Ok(());
        };

        match self.initialize(provider.as_ref(), address).await {
            Ok(Some((handles, balance))) => {
                let address = handles.address;
                if self.dispatch(Action::Initialized {
                    generation,
                    handles: Arc::new(handles),
                    balance,
                }) {
                    info!("Simple account {address:?} initialized");
                }
                Ok(())
            }
            Ok(None) => {
                error!("Smart account for signer {address:?} is undefined");
                self.dispatch(Action::AccountUnavailable { generation });
                Ok(())
            }
            Err(err) => Err(self.fail(generation, err)),
        }
    }

    async fn initialize(
        &self,
        provider: &P,
        address: Address,
    ) -> Result<Option<(Handles<P, S>, String)>, PanelError> {
        let signer = provider.get_signer(address).await.map_err(PanelError::signer)?;

        let Some(account) =
            self.sdk.init_account(signer, &self.config).await.map_err(PanelError::account)?
        else {
            return Ok(None);
        };
        let address = account.sender();
        debug!("Smart account address: {address:?}");

        let client = self.sdk.init_client(&self.config).await.map_err(PanelError::account)?;
        let balance = query_balance(provider, address).await?;

        Ok(Some((SessionHandles { address, account, client }, balance)))
    }

    pub fn open_dialog(&self) {
        self.dispatch(Action::OpenDialog);
    }

    pub fn close_dialog(&self) {
        self.dispatch(Action::CloseDialog);
    }

    pub fn set_recipient(&self, recipient: impl Into<String>) {
        self.dispatch(Action::SetRecipient(recipient.into()));
    }

    pub fn set_amount(&self, amount: impl Into<String>) {
        self.dispatch(Action::SetAmount(amount.into()));
    }

    /// Submits a transfer of the entered amount to the entered recipient, waits for settlement,
    /// refreshes the balance and closes the dialog. Only allowed while the dialog is open.
    ///
    /// Returns the hash of the transaction that included the user operation, `None` if the
    /// client reported no transaction.
    pub async fn submit_transfer(&self) -> Result<Option<H256>, PanelError> {
        let (generation, handles, recipient, amount) = {
            let session = self.session.lock();
            let handles = session.handles().cloned().ok_or(PanelError::NotInitialized)?;
            if !session.dialog_open() {
                return Err(PanelError::DialogClosed);
            }
            let transfer = session.transfer();
            (session.generation(), handles, transfer.recipient.clone(), transfer.amount.clone())
        };
        let provider = self.provider.clone().ok_or(PanelError::NotInitialized)?;

        let to: Address = recipient
            .trim()
            .parse()
            .map_err(|_| self.fail(generation, PanelError::InvalidRecipient { recipient }))?;
        let value = parse_ether(amount.trim()).map_err(|err| {
            self.fail(generation, PanelError::InvalidAmount { inner: err.to_string() })
        })?;

        let call = handles.account.execute(to, value, Bytes::default());
        let on_build: OnBuild = Box::new(|uo| info!("Signed UserOperation: {:?}", uo));

        let sent = handles
            .client
            .send_user_operation(call, on_build)
            .await
            .map_err(|err| self.fail(generation, PanelError::submission(err)))?;
        let user_op_hash = sent.user_op_hash;
        info!("UserOpHash: {user_op_hash}");
        self.dispatch(Action::TransferSubmitted { generation, user_op_hash });

        info!("Waiting for transaction...");
        let transaction_hash =
            sent.wait().await.map_err(|err| self.fail(generation, PanelError::settlement(err)))?;
        match transaction_hash {
            Some(hash) => info!("Transaction hash: {hash:?}"),
            None => info!("Transaction hash: null"),
        }
        self.dispatch(Action::TransferSettled { generation, transaction_hash });

        let balance = query_balance(provider.as_ref(), handles.address)
            .await
            .map_err(|err| self.fail(generation, err))?;
        self.dispatch(Action::TransferCompleted { generation, balance });

        Ok(transaction_hash)
    }
}

async fn query_balance<P: WalletProvider>(
    provider: &P,
    address: Address,
) -> Result<String, PanelError> {
    let balance = provider.get_balance(address).await.map_err(PanelError::balance)?;
    format_ether(balance).map_err(|err| PanelError::Balance { inner: err.to_string() })
}
