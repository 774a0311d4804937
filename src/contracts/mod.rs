//! Contract proxies over the erisdb RPC session.
//!
//! [`ContractManager`] validates contract definitions and hands out
//! [`Contract`] handles, which bind or deploy [`ContractInstance`]s.
//! Instances dispatch method calls by ABI name, routing constant
//! methods through read-only calls and everything else through held
//! transactions.

pub mod contract;
pub mod manager;

pub use contract::{Contract, ContractInstance};
pub use manager::ContractManager;

#[cfg(test)]
pub(crate) mod tests {
    use crate::types::{Data, PrivateAccount};
    use crate::utils::hex_str_to_bytes;

    /// The solc interface of a minimal adder contract.
    pub fn sample_abi_json() -> serde_json::Value {
        serde_json::json!([{
            "constant": true,
            "inputs": [
                {"name": "a", "type": "int256"},
                {"name": "b", "type": "int256"}
            ],
            "name": "add",
            "outputs": [{"name": "sum", "type": "int256"}],
            "type": "function"
        }])
    }

    pub fn test_account() -> PrivateAccount {
        PrivateAccount {
            address: "37236DF251AB70022B1DA351F08A20FB52443E37".parse().unwrap(),
            pub_key: None,
            priv_key: Data(
                hex_str_to_bytes(
                    "6B71D74E2A7B4A4C2D9C8C2C6E4D2B7A9C1E3F5D7B9A1C3E5F7D9B1A3C5E7F9D\
                     37236DF251AB70022B1DA351F08A20FB52443E3737236DF251AB70022B1DA351",
                )
                .unwrap(),
            ),
        }
    }
}

// End to end exercises against a local Eris/Burrow node, run with
// --ignored when one is listening on the default RPC port. The
// bytecode below is the compiled adder from sample_abi_json.

#[ignore]
#[test]
fn test_deploy_and_add() {
    use crate::abi::Token;
    use crate::ContractManager;
    use actix::System;
    use env_logger::{Builder, Env};
    use std::time::Duration;

    const SAMPLE_BYTECODE: &str = "6060604052605c8060106000396000f3606060405260e060020a6000350463a5f3c23b8114601a575b005b60243560043501606090815260200190f3";

    Builder::from_env(Env::default().default_filter_or("warn")).init(); // Change to debug for logs
    let runner = System::new();
    let manager = ContractManager::new(
        "http://127.0.0.1:1337/rpc",
        Duration::from_secs(30),
        tests::test_account(),
    );
    let contract = manager
        .new_contract(&tests::sample_abi_json(), Some(SAMPLE_BYTECODE), None)
        .unwrap();
    runner.block_on(async move {
        let instance = contract.deploy(&[]).await.unwrap();
        let ret = instance
            .call("add", &[Token::from(1i64), Token::from(2i64)])
            .await
            .unwrap();
        assert_eq!(ret[0].as_uint().unwrap(), 3u8.into());

        // binding a second handle to the deployed address sees the
        // same state
        let bound = contract.at(&instance.address().to_string()).unwrap();
        let ret = bound
            .call("add", &[Token::from(20i64), Token::from(22i64)])
            .await
            .unwrap();
        assert_eq!(ret[0].as_uint().unwrap(), 42u8.into());

        // constant calls on clones of one instance can run
        // concurrently
        let other = instance.clone();
        let (a, b) = futures::future::join(
            instance.call("add", &[Token::from(1i64), Token::from(1i64)]),
            other.call("add", &[Token::from(2i64), Token::from(2i64)]),
        )
        .await;
        assert_eq!(a.unwrap()[0].as_uint().unwrap(), 2u8.into());
        assert_eq!(b.unwrap()[0].as_uint().unwrap(), 4u8.into());
    })
}
