use crate::utils::{bytes_to_hex_str, hex_str_to_bytes};
use crate::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;

/// Serializes a slice of data in the bare upper case hex format the
/// ErisDB RPC expects, no `0x` prefix.
pub fn data_serialize<S>(x: &[u8], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&bytes_to_hex_str(x).to_uppercase())
}

/// Deserializes hex data, tolerating prefix and case differences
/// between node versions.
pub fn data_deserialize<'de, D>(d: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    hex_str_to_bytes(&s).map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq, Hash)]
pub struct Data(
    #[serde(
        serialize_with = "data_serialize",
        deserialize_with = "data_deserialize"
    )]
    pub Vec<u8>,
);

impl Deref for Data {
    type Target = Vec<u8>;
    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl From<Vec<u8>> for Data {
    fn from(v: Vec<u8>) -> Self {
        Data(v)
    }
}

/// A local signing identity in the shape ErisDB key files use. The
/// private key is handed to the node's unsafe transact endpoints, which
/// sign server side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrivateAccount {
    pub address: Address,
    #[serde(default)]
    pub pub_key: Option<Data>,
    pub priv_key: Data,
}

/// Result of `erisdb.call` and `erisdb.callCode`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    #[serde(rename = "return")]
    pub ret: Data,
    pub gas_used: u64,
}

/// Receipt returned by `erisdb.transact`, available as soon as the
/// transaction enters the mempool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: Data,
    pub creates_contract: u8,
    pub contract_addr: Option<Address>,
}

impl TxReceipt {
    pub fn creates_contract(&self) -> bool {
        self.creates_contract != 0
    }
}

/// The call frame attached to a held transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CallData {
    pub caller: Address,
    pub callee: Address,
    pub data: Data,
    pub value: u64,
    pub gas: u64,
}

/// Result of `erisdb.transactAndHold`, delivered once the transaction
/// has executed in a block. `exception` is the VM error string, empty
/// on success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EventDataCall {
    pub call_data: CallData,
    pub origin: Address,
    pub tx_id: Data,
    #[serde(rename = "return")]
    pub ret: Data,
    #[serde(default)]
    pub exception: Option<String>,
}

impl EventDataCall {
    /// The VM exception, if execution failed.
    pub fn exception(&self) -> Option<&str> {
        match &self.exception {
            Some(e) if !e.is_empty() => Some(e),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockchainInfo {
    pub chain_id: String,
    pub genesis_hash: Data,
    pub latest_block_height: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
    pub balance: u64,
    pub sequence: u64,
    #[serde(default)]
    pub code: Data,
    #[serde(default)]
    pub storage_root: Data,
}

// The erisdb namespace takes named parameter objects rather than
// positional arrays, one struct per method below.

#[derive(Serialize, Debug, Clone)]
pub struct AddressParam {
    pub address: Address,
}

#[derive(Serialize, Debug, Clone)]
pub struct CallParam {
    pub address: Address,
    pub data: Data,
}

#[derive(Serialize, Debug, Clone)]
pub struct CallCodeParam {
    pub code: Data,
    pub data: Data,
}

#[derive(Serialize, Debug, Clone)]
pub struct TransactParam {
    pub priv_key: Data,
    pub data: Data,
    /// Empty string deploys `data` as a new contract
    pub address: String,
    pub gas_limit: u64,
    pub fee: u64,
}
