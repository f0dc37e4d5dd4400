//! Account abstraction (ERC-4337) primitive types for the smart wallet
//!
//! This crate contains the user operation types exchanged with a bundler, the local signing
//! wallet and helpers for converting between wei and ether strings.

pub mod constants;
pub mod units;
mod user_operation;
mod utils;
mod wallet;

pub use user_operation::{
    UserOperation, UserOperationGasEstimation, UserOperationHash, UserOperationReceipt,
    UserOperationSigned,
};
pub use utils::get_address;
pub use wallet::Wallet;
