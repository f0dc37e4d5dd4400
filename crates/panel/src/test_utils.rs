use crate::{
    config::PanelConfig,
    traits::{AccountAbstraction, SentOperation, SmartAccount, UserOperationClient, WalletProvider},
};
use async_trait::async_trait;
use ethers::types::{Address, Bytes, H256, U256};
use futures::FutureExt;
use parking_lot::Mutex;
use smart_wallet_client::OnBuild;
use smart_wallet_primitives::{UserOperation, UserOperationSigned};
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::Notify;

/// Smart account address of signer `0xnn..nn` is `0xmm..mm` with `mm = nn + ACCOUNT_OFFSET`
pub const ACCOUNT_OFFSET: u8 = 0x10;

fn account_of(signer: Address) -> Address {
    Address::repeat_byte(signer.0[0] + ACCOUNT_OFFSET)
}

#[derive(Clone, Default)]
pub struct MockProvider {
    balances: Arc<Mutex<HashMap<Address, U256>>>,
    missing_signers: HashSet<Address>,
    delays: HashMap<Address, Duration>,
    balance_queries: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn with_balance(self, address: Address, balance: U256) -> Self {
        self.set_balance(address, balance);
        self
    }

    pub fn without_signer(mut self, signer: Address) -> Self {
        self.missing_signers.insert(signer);
        self
    }

    pub fn with_delay(mut self, signer: Address, delay: Duration) -> Self {
        self.delays.insert(signer, delay);
        self
    }

    pub fn set_balance(&self, address: Address, balance: U256) {
        self.balances.lock().insert(address, balance);
    }

    pub fn balance_queries(&self) -> usize {
        self.balance_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    type Signer = Address;

    async fn get_signer(&self, address: Address) -> eyre::Result<Address> {
        if let Some(delay) = self.delays.get(&address) {
            tokio::time::sleep(*delay).await;
        }
        if self.missing_signers.contains(&address) {
            return Err(eyre::eyre!("no signer for {address:?}"));
        }
        Ok(address)
    }

    async fn get_balance(&self, address: Address) -> eyre::Result<U256> {
        self.balance_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.balances.lock().get(&address).copied().unwrap_or_default())
    }
}

#[derive(Clone, Debug)]
pub struct MockCall {
    pub sender: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

pub struct MockAccount {
    sender: Address,
}

impl SmartAccount for MockAccount {
    type Call = MockCall;

    fn sender(&self) -> Address {
        self.sender
    }

    fn execute(&self, to: Address, value: U256, data: Bytes) -> MockCall {
        MockCall { sender: self.sender, to, value, data }
    }
}

#[derive(Clone, Default)]
pub struct MockSdk {
    no_account: HashSet<Address>,
    fail_submission: bool,
    transaction_hash: Option<H256>,
    gate: Option<Arc<Notify>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    built: Arc<AtomicUsize>,
}

impl MockSdk {
    pub fn without_account_for(mut self, signer: Address) -> Self {
        self.no_account.insert(signer);
        self
    }

    pub fn failing_submission(mut self) -> Self {
        self.fail_submission = true;
        self
    }

    pub fn with_transaction_hash(mut self, transaction_hash: Option<H256>) -> Self {
        self.transaction_hash = transaction_hash;
        self
    }

    /// Settlements wait for a notification on the returned gate
    pub fn settlement_gate(&mut self) -> Arc<Notify> {
        self.gate.get_or_insert_with(Default::default).clone()
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    pub fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountAbstraction<Address> for MockSdk {
    type Account = MockAccount;
    type Client = MockSdk;

    async fn init_account(
        &self,
        signer: Address,
        _config: &PanelConfig,
    ) -> eyre::Result<Option<MockAccount>> {
        if self.no_account.contains(&signer) {
            return Ok(None);
        }
        Ok(Some(MockAccount { sender: account_of(signer) }))
    }

    async fn init_client(&self, _config: &PanelConfig) -> eyre::Result<MockSdk> {
        Ok(self.clone())
    }
}

#[async_trait]
impl UserOperationClient<MockCall> for MockSdk {
    async fn send_user_operation(
        &self,
        call: MockCall,
        on_build: OnBuild,
    ) -> eyre::Result<SentOperation> {
        if self.fail_submission {
            return Err(eyre::eyre!("AA21 didn't pay prefund"));
        }

        let hash = H256::repeat_byte(0x42).into();
        let uo = UserOperationSigned::default().sender(call.sender).call_data(call.data.clone());
        on_build(&UserOperation::from_user_operation_signed(hash, uo));
        self.built.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(call);

        let gate = self.gate.clone();
        let transaction_hash = self.transaction_hash;
        Ok(SentOperation::new(
            hash,
            async move {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                Ok(transaction_hash)
            }
            .boxed(),
        ))
    }
}
