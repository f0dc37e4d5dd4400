//! A `Wallet` is a wrapper around an ethers wallet that owns (signs for) a smart account
use crate::{UserOperation, UserOperationSigned};
use ethers::{
    prelude::{k256::ecdsa::SigningKey, rand},
    signers::{
        coins_bip39::{English, Mnemonic},
        MnemonicBuilder, Signer,
    },
    types::Address,
};
use expanded_pathbuf::ExpandedPathBuf;
use std::{fs, path::PathBuf};
use tracing::debug;

/// BIP-44 derivation path prefix for Ethereum accounts
const DERIVATION_PATH_PREFIX: &str = "m/44'/60'/0'/0/";

/// Wrapper around ethers wallet
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Signing key of the wallet
    pub signer: ethers::signers::Wallet<SigningKey>,
}

impl Wallet {
    /// Builds a `Wallet` from a freshly generated mnemonic phrase and writes the phrase to `path`
    ///
    /// # Arguments
    /// * `path` - The file where the mnemonic phrase will be written (parent directories are
    ///   created)
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `Self` - A new `Wallet` instance (account index 0)
    pub fn build_random(path: ExpandedPathBuf, chain_id: u64) -> eyre::Result<Self> {
        let mut rng = rand::thread_rng();
        let mnemonic = Mnemonic::<English>::new(&mut rng);
        let phrase = mnemonic.to_phrase();

        let path: PathBuf = path.to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &phrase)?;
        debug!("Mnemonic phrase written to {path:?}");

        Self::from_phrase(&phrase, 0, chain_id)
    }

    /// Create a new wallet from the given file containing the mnemonic phrase
    ///
    /// # Arguments
    /// * `path` - The path to the file where the mnemonic phrase is stored
    /// * `index` - The account index in the derivation path
    /// * `chain_id` - The chain id of the blockchain network to be used
    pub fn from_file(path: ExpandedPathBuf, index: u32, chain_id: u64) -> eyre::Result<Self> {
        let phrase = fs::read_to_string(path.to_path_buf())?;
        Self::from_phrase(phrase.trim(), index, chain_id)
    }

    /// Create a new wallet from the given mnemonic phrase
    ///
    /// # Arguments
    /// * `phrase` - The mnemonic phrase
    /// * `index` - The account index in the derivation path
    /// * `chain_id` - The chain id of the blockchain network to be used
    pub fn from_phrase(phrase: &str, index: u32, chain_id: u64) -> eyre::Result<Self> {
        let wallet = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .derivation_path(&format!("{DERIVATION_PATH_PREFIX}{index}"))?
            .build()?;

        Ok(Self { signer: wallet.with_chain_id(chain_id) })
    }

    /// Create a new wallet from a hex encoded private key
    pub fn from_private_key(key: &str, chain_id: u64) -> eyre::Result<Self> {
        let wallet = key.trim_start_matches("0x").parse::<ethers::signers::LocalWallet>()?;
        Ok(Self { signer: wallet.with_chain_id(chain_id) })
    }

    /// Address of the externally-owned account
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Chain id the signer is bound to
    pub fn chain_id(&self) -> u64 {
        self.signer.chain_id()
    }

    /// Signs the user operation
    ///
    /// # Arguments
    /// * `uo` - The [UserOperationSigned](UserOperationSigned) to be signed
    /// * `ep` - The entry point contract address
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `UserOperation` - The signed [UserOperation](UserOperation) together with its hash
    pub async fn sign_user_operation(
        &self,
        uo: &UserOperationSigned,
        ep: &Address,
        chain_id: u64,
    ) -> eyre::Result<UserOperation> {
        let h = uo.hash(ep, chain_id);
        let sig = self.signer.sign_message(h.0.as_bytes()).await?;
        Ok(UserOperation::from_user_operation_signed(
            h,
            uo.clone().signature(sig.to_vec().into()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::{RecoveryMessage, Signature};

    const PHRASE: &str = "test test test test test test test test test test test junk";

    #[test]
    fn derive_accounts_from_phrase() {
        let first = Wallet::from_phrase(PHRASE, 0, 1337).unwrap();
        let second = Wallet::from_phrase(PHRASE, 1, 1337).unwrap();
        assert_eq!(
            first.address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().unwrap()
        );
        assert_eq!(
            second.address(),
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse::<Address>().unwrap()
        );
        assert_eq!(first.chain_id(), 1337);
    }

    #[test]
    fn build_random_writes_phrase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys").join("mnemonic");
        let wallet = Wallet::build_random(ExpandedPathBuf(path.clone()), 1).unwrap();
        let restored = Wallet::from_file(ExpandedPathBuf(path), 0, 1).unwrap();
        assert_eq!(wallet.address(), restored.address());
    }

    #[tokio::test]
    async fn sign_user_operation_recovers_owner() {
        let wallet = Wallet::from_phrase(PHRASE, 0, 80_001).unwrap();
        let ep: Address = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse().unwrap();
        let uo = UserOperationSigned::default()
            .sender("0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap())
            .verification_gas_limit(100_000.into());

        let signed = wallet.sign_user_operation(&uo, &ep, 80_001).await.unwrap();
        assert_eq!(signed.hash, uo.hash(&ep, 80_001));

        let signature = Signature::try_from(signed.signature.as_ref()).unwrap();
        let recovered = signature
            .recover(RecoveryMessage::Data(signed.hash.0.as_bytes().to_vec()))
            .unwrap();
        assert_eq!(recovered, wallet.address());
    }
}
