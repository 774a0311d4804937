use crate::error::Error;
use crate::types::{Data, EventDataCall, TransactParam, TxReceipt};
use crate::Address;
use std::time::Duration;

use super::core::ErisDb;
use super::{DEFAULT_FEE, DEFAULT_GAS_LIMIT};

// State-changing calls of the erisdb namespace. These endpoints take
// the caller's private key and the node signs server side, so they
// are only safe against a node you trust, typically localhost.

impl ErisDb {
    /// Broadcasts a call transaction and returns as soon as it is
    /// accepted into the mempool. Pass `None` for `address` to deploy
    /// `data` as a new contract.
    pub async fn transact(
        &self,
        priv_key: Data,
        address: Option<Address>,
        data: Vec<u8>,
    ) -> Result<TxReceipt, Error> {
        self.jsonrpc_client
            .request_method(
                "erisdb.transact",
                transact_param(priv_key, address, data),
                self.timeout,
            )
            .await
    }

    /// Broadcasts a call transaction and holds the request open until
    /// it has executed in a block, returning the call frame with the
    /// VM return value. Since the node blocks until the next block is
    /// produced this waits well beyond the normal request timeout.
    pub async fn transact_and_hold(
        &self,
        priv_key: Data,
        address: Option<Address>,
        data: Vec<u8>,
    ) -> Result<EventDataCall, Error> {
        let held = self.timeout + Duration::from_secs(30);
        self.jsonrpc_client
            .request_method(
                "erisdb.transactAndHold",
                transact_param(priv_key, address, data),
                held,
            )
            .await
    }
}

fn transact_param(priv_key: Data, address: Option<Address>, data: Vec<u8>) -> TransactParam {
    TransactParam {
        priv_key,
        data: data.into(),
        // deployments are addressed to the empty string
        address: address.map(|a| a.to_string()).unwrap_or_default(),
        gas_limit: DEFAULT_GAS_LIMIT,
        fee: DEFAULT_FEE,
    }
}
