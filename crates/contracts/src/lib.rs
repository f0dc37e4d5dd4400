pub mod entry_point;
mod error;
mod gen;
pub mod simple_account;

pub use entry_point::EntryPoint;
pub use error::{decode_revert_error, decode_revert_string, EntryPointError};
pub use gen::{
    entry_point_api::{EntryPointAPIErrors, FailedOp, SenderAddressResult},
    EntryPointAPI, SimpleAccountAPI, SimpleAccountFactoryAPI,
};
pub use simple_account::{execute_call_data, execute_batch_call_data, init_code};
