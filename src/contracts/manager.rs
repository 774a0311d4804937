use crate::client::ErisDb;
use crate::contracts::Contract;
use crate::error::Error;
use crate::types::PrivateAccount;
use crate::utils::is_hex;
use crate::Address;
use std::time::Duration;

/// Session-scoped factory for contract handles. Holds the RPC client
/// and the signing account every produced contract will transact as.
#[derive(Clone)]
pub struct ContractManager {
    client: ErisDb,
    account: PrivateAccount,
}

impl ContractManager {
    pub fn new(url: &str, timeout: Duration, account: PrivateAccount) -> Self {
        Self {
            client: ErisDb::new(url, timeout),
            account,
        }
    }

    /// The underlying RPC client, for queries outside any contract.
    pub fn client(&self) -> &ErisDb {
        &self.client
    }

    pub fn account(&self) -> &PrivateAccount {
        &self.account
    }

    /// Validates the pieces of a contract definition and produces a
    /// [`Contract`] handle. All validation happens here, before any
    /// network traffic.
    ///
    /// `abi` is the compiler's JSON interface and must be an array.
    /// `bytecode` is required only if the contract will be deployed
    /// with [`Contract::deploy`], `address` only pre-binds
    /// [`Contract::at`].
    pub fn new_contract(
        &self,
        abi: &serde_json::Value,
        bytecode: Option<&str>,
        address: Option<&str>,
    ) -> Result<Contract, Error> {
        if !abi.is_array() {
            return Err(Error::InvalidArgument("ABI is required parameter".into()));
        }
        let abi = serde_json::from_value(abi.clone())
            .map_err(|e| Error::InvalidArgument(format!("ABI is invalid: {e}")))?;

        let bytecode = match bytecode {
            Some(code) if !code.is_empty() => {
                if !is_hex(code) {
                    return Err(Error::InvalidArgument(
                        "Bytecode have to be a HEX string".into(),
                    ));
                }
                crate::utils::hex_str_to_bytes(code)?
            }
            _ => Vec::new(),
        };

        let address = match address {
            Some(addr) if !addr.is_empty() => match addr.parse::<Address>() {
                Ok(a) => Some(a),
                Err(_) => {
                    return Err(Error::InvalidArgument(
                        "Address have to be a valid address".into(),
                    ))
                }
            },
            _ => None,
        };

        Ok(Contract::new(
            abi,
            bytecode,
            address,
            self.account.clone(),
            self.client.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::tests::{sample_abi_json, test_account};

    fn manager() -> ContractManager {
        ContractManager::new(
            "http://127.0.0.1:1337/rpc",
            Duration::from_secs(30),
            test_account(),
        )
    }

    #[test]
    fn rejects_non_array_abi() {
        let err = manager()
            .new_contract(&serde_json::json!({"not": "an array"}), None, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "ABI is required parameter");
    }

    #[test]
    fn rejects_missing_abi() {
        let err = manager()
            .new_contract(&serde_json::Value::Null, None, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "ABI is required parameter");
    }

    #[test]
    fn rejects_non_hex_bytecode() {
        let err = manager()
            .new_contract(&sample_abi_json(), Some("not-hex!"), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Bytecode have to be a HEX string");
    }

    #[test]
    fn rejects_odd_length_bytecode() {
        let err = manager()
            .new_contract(&sample_abi_json(), Some("ABC"), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Bytecode have to be a HEX string");
    }

    #[test]
    fn rejects_malformed_address() {
        let err = manager()
            .new_contract(&sample_abi_json(), None, Some("wrong-address"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Address have to be a valid address");
    }

    #[test]
    fn accepts_empty_optionals() {
        // empty strings are treated the same as absent values
        let contract = manager()
            .new_contract(&sample_abi_json(), Some(""), Some(""))
            .unwrap();
        assert!(contract.address().is_none());
    }

    #[test]
    fn accepts_full_definition() {
        let contract = manager()
            .new_contract(
                &sample_abi_json(),
                Some("606060405260"),
                Some("5038D9D0E1A1BE977D82F0A8FD1D611AF26C2E3C"),
            )
            .unwrap();
        assert_eq!(
            contract.address().unwrap().to_string(),
            "5038D9D0E1A1BE977D82F0A8FD1D611AF26C2E3C"
        );
    }
}
