use std::time::Duration;

use crate::jsonrpc::client::HttpClient;

// Core details and simple functions of the ErisDb client

/// Client for the erisdb JSON-RPC namespace of an Eris/Burrow node,
/// communicating over HTTP. Cheaply cloneable, clones share the
/// request id counter.
#[derive(Clone)]
pub struct ErisDb {
    pub(crate) url: String,
    pub(crate) jsonrpc_client: HttpClient,
    pub(crate) timeout: Duration,
}

impl ErisDb {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            jsonrpc_client: HttpClient::new(url),
            timeout,
            url: url.to_string(),
        }
    }

    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn get_url(&self) -> String {
        self.url.clone()
    }
}
