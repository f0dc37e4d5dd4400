//! Call data builders for the simple account and its factory

use crate::gen::{
    simple_account_api::{ExecuteBatchCall, ExecuteCall},
    simple_account_factory_api::CreateAccountCall,
};
use ethers::{
    abi::AbiEncode,
    types::{Address, Bytes, U256},
};

/// Init code deploying a simple account for `owner` through `factory`
pub fn init_code(factory: Address, owner: Address, salt: U256) -> Bytes {
    [factory.as_bytes().to_vec(), CreateAccountCall { owner, salt }.encode()].concat().into()
}

/// Call data of `SimpleAccount.execute(dest, value, func)`
pub fn execute_call_data(dest: Address, value: U256, func: Bytes) -> Bytes {
    ExecuteCall { dest, value, func }.encode().into()
}

/// Call data of `SimpleAccount.executeBatch(dest, func)`
pub fn execute_batch_call_data(dest: Vec<Address>, func: Vec<Bytes>) -> Bytes {
    ExecuteBatchCall { dest, func }.encode().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_account_init_code() {
        let init_code = init_code(
            "0x9406Cc6185a346906296840746125a0E44976454".parse().unwrap(),
            "0xce0fefa6f7979c4c9b5373e0f5105b7259092c6d".parse().unwrap(),
            U256::zero(),
        );
        assert_eq!(
            init_code,
            "0x9406cc6185a346906296840746125a0e449764545fbfb9cf000000000000000000000000ce0fefa6f7979c4c9b5373e0f5105b7259092c6d0000000000000000000000000000000000000000000000000000000000000000"
                .parse::<Bytes>()
                .unwrap()
        );
    }

    #[test]
    fn simple_account_execute() {
        let call_data = execute_call_data(
            "0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap(),
            U256::from(100_000_000_000_000u64),
            Bytes::default(),
        );
        assert_eq!(
            call_data,
            "0xb61d27f60000000000000000000000009c5754de1443984659e1b3a8d1931d83475ba29c00000000000000000000000000000000000000000000000000005af3107a400000000000000000000000000000000000000000000000000000000000000000600000000000000000000000000000000000000000000000000000000000000000"
                .parse::<Bytes>()
                .unwrap()
        );
    }

    #[test]
    fn simple_account_execute_batch_selector() {
        let call_data = execute_batch_call_data(vec![Address::zero()], vec![Bytes::default()]);
        assert_eq!(&call_data[..4], &[0x18, 0xdf, 0xb3, 0xc7]);
    }
}
