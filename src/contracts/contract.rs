use crate::abi::{Abi, Token};
use crate::client::ErisDb;
use crate::error::Error;
use crate::types::PrivateAccount;
use crate::utils::bytes_to_hex_str;
use crate::Address;
use std::fmt;

/// A contract type definition, the pair of an ABI and optionally the
/// deployable bytecode. One `Contract` is reused across any number of
/// [`at`](Contract::at) bindings and [`deploy`](Contract::deploy)s.
#[derive(Clone)]
pub struct Contract {
    abi: Abi,
    bytecode: Vec<u8>,
    address: Option<Address>,
    account: PrivateAccount,
    client: ErisDb,
}

impl Contract {
    pub(crate) fn new(
        abi: Abi,
        bytecode: Vec<u8>,
        address: Option<Address>,
        account: PrivateAccount,
        client: ErisDb,
    ) -> Self {
        Self {
            abi,
            bytecode,
            address,
            account,
            client,
        }
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// The address this definition was created with, if any.
    pub fn address(&self) -> Option<Address> {
        self.address
    }

    /// Binds to an already deployed contract. This validates the
    /// address locally and never touches the network, so failure is
    /// immediate.
    pub fn at(&self, address: &str) -> Result<ContractInstance, Error> {
        let address: Address = address
            .parse()
            .map_err(|_| Error::InvalidArgument("Address is required parameter".into()))?;
        Ok(self.bind(address))
    }

    /// Binds to the address provided at definition time.
    pub fn instance(&self) -> Result<ContractInstance, Error> {
        match self.address {
            Some(address) => Ok(self.bind(address)),
            None => Err(Error::InvalidArgument(
                "Address is required parameter".into(),
            )),
        }
    }

    /// Deploys a fresh instance and resolves once it has executed in a
    /// block. Constructor arguments are ABI-encoded and appended to
    /// the bytecode.
    pub async fn deploy(&self, args: &[Token]) -> Result<ContractInstance, Error> {
        if self.bytecode.is_empty() {
            return Err(Error::InvalidArgument(
                "Bytecode is required parameter".into(),
            ));
        }
        let mut data = self.bytecode.clone();
        match self.abi.constructor() {
            Some(constructor) => data.extend(constructor.encode_args(args)?),
            None if args.is_empty() => {}
            None => {
                return Err(Error::EncodingError(
                    "constructor arguments provided but the abi declares no constructor"
                        .to_string(),
                ))
            }
        }
        let held = self
            .client
            .transact_and_hold(self.account.priv_key.clone(), None, data)
            .await?;
        if let Some(exception) = held.exception() {
            return Err(Error::ContractCallError(format!(
                "deployment failed: {exception}"
            )));
        }
        info!("deployed contract at {}", held.call_data.callee);
        Ok(self.bind(held.call_data.callee))
    }

    fn bind(&self, address: Address) -> ContractInstance {
        ContractInstance {
            address,
            abi: self.abi.clone(),
            account: self.account.clone(),
            client: self.client.clone(),
        }
    }
}

// the RPC client wraps an awc::Client, which has no Debug impl
impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Contract")
            .field("abi", &self.abi)
            .field("bytecode", &bytes_to_hex_str(&self.bytecode))
            .field("address", &self.address)
            .finish()
    }
}

/// A contract bound to a deployed address. Methods are dispatched by
/// their ABI name through [`call`](ContractInstance::call).
#[derive(Clone)]
pub struct ContractInstance {
    address: Address,
    abi: Abi,
    account: PrivateAccount,
    client: ErisDb,
}

impl ContractInstance {
    pub fn address(&self) -> Address {
        self.address
    }

    /// Names of the callable methods this instance exposes.
    pub fn methods(&self) -> Vec<&str> {
        self.abi.functions().map(|f| f.name.as_str()).collect()
    }

    /// Invokes the ABI method `name` with `args` and decodes its
    /// return values. Constant methods run as a read-only simulated
    /// call, everything else is sent as a transaction and held until
    /// it has executed in a block.
    pub async fn call(&self, name: &str, args: &[Token]) -> Result<Vec<Token>, Error> {
        let method = match self.abi.function(name) {
            Some(m) => m,
            None => {
                return Err(Error::ContractCallError(format!(
                    "abi has no method named {name}"
                )))
            }
        };
        let payload = method.encode_call(args)?;
        trace!("calling {} on {}", method.signature(), self.address);

        let ret = if method.is_constant() {
            self.client.call(self.address, payload).await?.ret
        } else {
            let held = self
                .client
                .transact_and_hold(self.account.priv_key.clone(), Some(self.address), payload)
                .await?;
            if let Some(exception) = held.exception() {
                return Err(Error::ContractCallError(format!(
                    "{name} failed: {exception}"
                )));
            }
            held.ret
        };
        method.decode_output(&ret)
    }
}

impl fmt::Debug for ContractInstance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ContractInstance")
            .field("address", &self.address)
            .field("abi", &self.abi)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::tests::{sample_abi_json, test_account};
    use crate::ContractManager;
    use std::time::Duration;

    const ADDRESS: &str = "5038D9D0E1A1BE977D82F0A8FD1D611AF26C2E3C";

    fn sample_contract() -> Contract {
        let manager = ContractManager::new(
            "http://127.0.0.1:1337/rpc",
            Duration::from_secs(30),
            test_account(),
        );
        manager
            .new_contract(&sample_abi_json(), Some("606060405260"), None)
            .unwrap()
    }

    #[test]
    fn at_rejects_missing_address() {
        let err = sample_contract().at("").unwrap_err();
        assert_eq!(err.to_string(), "Address is required parameter");
    }

    #[test]
    fn at_rejects_malformed_address() {
        let err = sample_contract().at("wrong-address").unwrap_err();
        assert_eq!(err.to_string(), "Address is required parameter");
    }

    #[test]
    fn at_binds_valid_address() {
        let instance = sample_contract().at(ADDRESS).unwrap();
        assert_eq!(instance.address().to_string(), ADDRESS);
    }

    #[test]
    fn at_accepts_prefixed_lower_case() {
        let instance = sample_contract()
            .at("0x5038d9d0e1a1be977d82f0a8fd1d611af26c2e3c")
            .unwrap();
        assert_eq!(instance.address().to_string(), ADDRESS);
    }

    #[test]
    fn at_is_repeatable() {
        let contract = sample_contract();
        let a = contract.at(ADDRESS).unwrap();
        let b = contract.at(ADDRESS).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.methods(), b.methods());
    }

    #[test]
    fn instance_has_abi_methods() {
        let instance = sample_contract().at(ADDRESS).unwrap();
        assert_eq!(instance.methods(), vec!["add"]);
    }

    #[test]
    fn instance_without_preset_address_fails() {
        let err = sample_contract().instance().unwrap_err();
        assert_eq!(err.to_string(), "Address is required parameter");
    }

    #[test]
    fn deploy_without_bytecode_fails() {
        use actix::System;

        let manager = ContractManager::new(
            "http://127.0.0.1:1337/rpc",
            Duration::from_secs(30),
            test_account(),
        );
        let contract = manager
            .new_contract(&sample_abi_json(), None, None)
            .unwrap();
        // fails during validation, no node required
        let runner = System::new();
        runner.block_on(async move {
            let err = contract.deploy(&[]).await.unwrap_err();
            assert!(matches!(&err, Error::InvalidArgument(_)));
            assert_eq!(err.to_string(), "Bytecode is required parameter");
        })
    }

    #[test]
    fn handles_format_for_debugging() {
        let contract = sample_contract();
        let repr = format!("{contract:?}");
        assert!(repr.contains("Contract"));
        assert!(repr.contains("add"));
        assert!(repr.contains("606060405260"));

        let instance = contract.at(ADDRESS).unwrap();
        let repr = format!("{instance:?}");
        assert!(repr.contains("ContractInstance"));
        assert!(repr.contains("add"));
    }
}
