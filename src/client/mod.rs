//! Lightweight client for the erisdb JSON-RPC namespace.
//!
//! Every endpoint here is a thin typed wrapper over one RPC method,
//! higher level contract handling lives in the contracts module.

/// Gas limit attached to transactions when the caller does not care,
/// generous for contract deployment on a permissioned chain.
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;
/// Eris permissioned chains typically run with zero fees.
pub const DEFAULT_FEE: u64 = 0;

pub mod core;
pub mod query;
pub mod transactions;

// The actual ErisDb client is defined in core.rs, export here
pub use self::core::ErisDb;

// These tests require a local Eris/Burrow node listening on the
// default RPC port, run them with --ignored when one is up.

#[ignore]
#[test]
fn test_blockchain_info() {
    use actix::System;
    use env_logger::{Builder, Env};
    use std::time::Duration;
    Builder::from_env(Env::default().default_filter_or("warn")).init(); // Change to debug for logs
    let runner = System::new();
    let client = ErisDb::new("http://127.0.0.1:1337/rpc", Duration::from_secs(30));
    runner.block_on(async move {
        let info = client.get_blockchain_info().await.unwrap();
        assert!(!info.chain_id.is_empty());
        let height = client.get_latest_block_height().await.unwrap();
        assert!(height >= info.latest_block_height);
    })
}

#[ignore]
#[test]
fn test_wait_for_next_block() {
    use actix::System;
    use std::time::Duration;
    let runner = System::new();
    let client = ErisDb::new("http://127.0.0.1:1337/rpc", Duration::from_secs(30));
    runner.block_on(async move {
        client
            .wait_for_next_block(Duration::from_secs(60))
            .await
            .unwrap();
    })
}

#[ignore]
#[test]
fn test_call_code() {
    use actix::System;
    use std::time::Duration;
    let runner = System::new();
    let client = ErisDb::new("http://127.0.0.1:1337/rpc", Duration::from_secs(30));
    // PUSH1 0x2a PUSH1 0x00 MSTORE PUSH1 0x20 PUSH1 0x00 RETURN
    let code = crate::utils::hex_str_to_bytes("602a60005260206000f3").unwrap();
    runner.block_on(async move {
        let res = client.call_code(code, Vec::new()).await.unwrap();
        assert_eq!(res.ret.last(), Some(&42u8));
    })
}
