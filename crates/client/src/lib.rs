//! Account abstraction (ERC-4337) client
//!
//! Builds user operations for a simple account, submits them to a bundler and waits until they
//! are included on-chain.

mod account;
pub mod api;
mod client;
mod error;
pub mod provider;

pub use account::{SimpleAccount, UserOperationBuilder};
pub use api::BundlerApiClient;
pub use client::{
    apply_gas_estimation, wait_for_receipt, Client, OnBuild, SendOptions,
    SendUserOperationResponse,
};
pub use error::ClientError;
