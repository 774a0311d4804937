use crate::error::Error;
use crate::types::{Account, AddressParam, BlockchainInfo, CallCodeParam, CallParam, CallResult};
use crate::Address;
use std::time::Duration;
use std::time::Instant;
use tokio::time::sleep;

use super::core::ErisDb;

// The query-only part of the erisdb namespace

impl ErisDb {
    /// Chain id, genesis hash and current height of the node.
    pub async fn get_blockchain_info(&self) -> Result<BlockchainInfo, Error> {
        self.jsonrpc_client
            .request_method(
                "erisdb.getBlockchainInfo",
                serde_json::json!({}),
                self.timeout,
            )
            .await
    }

    pub async fn get_latest_block_height(&self) -> Result<u64, Error> {
        self.jsonrpc_client
            .request_method(
                "erisdb.getLatestBlockHeight",
                serde_json::json!({}),
                self.timeout,
            )
            .await
    }

    pub async fn get_account(&self, address: Address) -> Result<Account, Error> {
        self.jsonrpc_client
            .request_method(
                "erisdb.getAccount",
                AddressParam { address },
                self.timeout,
            )
            .await
    }

    /// Executes a read-only call against the code at `address`. Nothing
    /// is committed to the chain and no fee is charged.
    pub async fn call(&self, address: Address, data: Vec<u8>) -> Result<CallResult, Error> {
        self.jsonrpc_client
            .request_method(
                "erisdb.call",
                CallParam {
                    address,
                    data: data.into(),
                },
                self.timeout,
            )
            .await
    }

    /// Executes `data` against the provided VM bytecode in a scratch
    /// frame, without any on-chain account.
    pub async fn call_code(&self, code: Vec<u8>, data: Vec<u8>) -> Result<CallResult, Error> {
        self.jsonrpc_client
            .request_method(
                "erisdb.callCode",
                CallCodeParam {
                    code: code.into(),
                    data: data.into(),
                },
                self.timeout,
            )
            .await
    }

    /// Waits for the chain height to advance past the height observed
    /// on the first successful poll. Individual poll errors do not
    /// exit early, only the deadline does.
    pub async fn wait_for_next_block(&self, timeout: Duration) -> Result<(), Error> {
        let start = Instant::now();
        let mut last_height: Option<u64> = None;
        while Instant::now() - start < timeout {
            match (self.get_latest_block_height().await, last_height) {
                (Ok(n), None) => last_height = Some(n),
                (Ok(height), Some(last_height)) => {
                    if height > last_height {
                        return Ok(());
                    }
                }
                (Err(_), _) => {}
            }
            sleep(Duration::from_secs(1)).await;
        }
        Err(Error::NoBlockProduced { time: timeout })
    }
}
