//! A typed view of the JSON ABI spec emitted by the Solidity compiler,
//! plus just enough encoding machinery to build and decode contract
//! calls against it.
//!
//! This is deliberately not a complete ABI implementation. It is a set
//! of helpers sufficient for the kind of contracts a thin client
//! library deals with, flat parameter lists with the occasional string
//! or single level array.

pub mod decode;
pub mod param_type;
pub mod token;

pub use decode::decode_tokens;
pub use param_type::ParamType;
pub use token::{derive_method_id, encode_call, encode_tokens, Token};

use crate::Error;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use std::fmt;
use std::fmt::Write;

/// Deserializes the "type" value of an ABI entry
///
/// https://solidity.readthedocs.io/en/develop/abi-spec.html#abi-json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Function,
    Constructor,
    Event,
    Fallback,
    Receive,
}

/// Later solc versions replace the legacy `constant` flag with this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

/// A single named, typed input or output of an ABI entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamType,
}

impl<'de> Deserialize<'de> for Param {
    fn deserialize<D>(deserializer: D) -> Result<Param, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawParam {
            #[serde(default)]
            name: String,
            #[serde(rename = "type")]
            kind: String,
        }
        let raw = RawParam::deserialize(deserializer)?;
        let kind = raw.kind.parse().map_err(serde::de::Error::custom)?;
        Ok(Param {
            name: raw.name,
            kind,
        })
    }
}

/// One entry of a contract ABI, a function, constructor or event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub operation: Operation,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default)]
    pub outputs: Vec<Param>,
    #[serde(default)]
    constant: bool,
    #[serde(default, rename = "stateMutability")]
    state_mutability: Option<StateMutability>,
}

impl Item {
    /// Read only methods use query style calls, everything else has to
    /// go through a transaction.
    pub fn is_constant(&self) -> bool {
        self.constant
            || matches!(
                self.state_mutability,
                Some(StateMutability::Pure) | Some(StateMutability::View)
            )
    }

    /// The canonical signature, e.g. `add(int256,int256)`.
    pub fn signature(&self) -> String {
        let mut sig = format!("{}(", self.name);
        for (i, input) in self.inputs.iter().enumerate() {
            if i > 0 {
                sig.push(',');
            }
            write!(sig, "{}", input.kind).unwrap();
        }
        sig.push(')');
        sig
    }

    fn check_args(&self, args: &[Token]) -> Result<(), Error> {
        if args.len() != self.inputs.len() {
            return Err(Error::EncodingError(format!(
                "{} takes {} arguments, got {}",
                self.signature(),
                self.inputs.len(),
                args.len()
            )));
        }
        for (arg, input) in args.iter().zip(self.inputs.iter()) {
            if !arg.type_check(&input.kind) {
                return Err(Error::EncodingError(format!(
                    "argument {:?} does not match declared type {}",
                    arg, input.kind
                )));
            }
        }
        Ok(())
    }

    /// Builds the full call payload, method id plus encoded arguments.
    pub fn encode_call(&self, args: &[Token]) -> Result<Vec<u8>, Error> {
        self.check_args(args)?;
        encode_call(&self.signature(), args)
    }

    /// Encodes arguments without a method id, the form appended to
    /// bytecode for constructor arguments.
    pub fn encode_args(&self, args: &[Token]) -> Result<Vec<u8>, Error> {
        self.check_args(args)?;
        encode_tokens(args)
    }

    /// Decodes raw return bytes against the declared outputs.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, Error> {
        let types: Vec<ParamType> = self.outputs.iter().map(|o| o.kind.clone()).collect();
        decode_tokens(&types, data)
    }
}

/// An ordered contract ABI, the unit `ContractManager::new_contract`
/// validates and the method registry contract calls dispatch against.
#[derive(Debug, Clone, PartialEq)]
pub struct Abi {
    items: Vec<Item>,
}

impl Abi {
    /// Looks up a function entry by name. Overloads are not
    /// distinguished, the first match wins.
    pub fn function(&self, name: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.operation == Operation::Function && item.name == name)
    }

    pub fn constructor(&self) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.operation == Operation::Constructor)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|item| item.operation == Operation::Function)
    }
}

impl<'de> Deserialize<'de> for Abi {
    fn deserialize<D>(deserializer: D) -> Result<Abi, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(AbiVisitor)
    }
}

struct AbiVisitor;

impl<'de> Visitor<'de> for AbiVisitor {
    type Value = Abi;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("valid abi spec file")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut result = Abi { items: Vec::new() };
        while let Some(item) = seq.next_element()? {
            result.items.push(item)
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // solc output for:
    //   contract SampleContract {
    //     function add(int a, int b) constant returns (int sum) { sum = a + b; }
    //   }
    const SAMPLE_ABI: &str = r#"[
        {
            "constant": true,
            "inputs": [
                {"name": "a", "type": "int256"},
                {"name": "b", "type": "int256"}
            ],
            "name": "add",
            "outputs": [{"name": "sum", "type": "int256"}],
            "type": "function"
        }
    ]"#;

    #[test]
    fn parse_sample_abi() {
        let abi: Abi = serde_json::from_str(SAMPLE_ABI).unwrap();
        let add = abi.function("add").unwrap();
        assert!(add.is_constant());
        assert_eq!(add.signature(), "add(int256,int256)");
        assert_eq!(add.inputs.len(), 2);
        assert_eq!(add.outputs[0].kind, ParamType::Int(256));
        assert!(abi.function("missing").is_none());
        assert!(abi.constructor().is_none());
    }

    #[test]
    fn parse_modern_mutability() {
        let abi: Abi = serde_json::from_str(
            r#"[
                {
                    "inputs": [],
                    "name": "getValue",
                    "outputs": [{"name": "", "type": "string"}],
                    "stateMutability": "view",
                    "type": "function"
                },
                {
                    "inputs": [{"name": "value", "type": "string"}],
                    "name": "setValue",
                    "outputs": [],
                    "stateMutability": "nonpayable",
                    "type": "function"
                },
                {
                    "inputs": [{"name": "value", "type": "string"}],
                    "stateMutability": "nonpayable",
                    "type": "constructor"
                }
            ]"#,
        )
        .unwrap();
        assert!(abi.function("getValue").unwrap().is_constant());
        assert!(!abi.function("setValue").unwrap().is_constant());
        assert_eq!(abi.constructor().unwrap().inputs.len(), 1);
        assert_eq!(abi.functions().count(), 2);
    }

    #[test]
    fn reject_non_sequence() {
        assert!(serde_json::from_str::<Abi>(r#"{"name": "add"}"#).is_err());
    }

    #[test]
    fn encode_call_arity_check() {
        let abi: Abi = serde_json::from_str(SAMPLE_ABI).unwrap();
        let add = abi.function("add").unwrap();
        let res = add.encode_call(&[1i64.into()]);
        assert!(matches!(res, Err(Error::EncodingError(_))));
    }

    #[test]
    fn encode_call_type_check() {
        let abi: Abi = serde_json::from_str(SAMPLE_ABI).unwrap();
        let add = abi.function("add").unwrap();
        let res = add.encode_call(&[Token::from("one"), Token::from("two")]);
        assert!(matches!(res, Err(Error::EncodingError(_))));
    }

    #[test]
    fn encode_call_payload() {
        let abi: Abi = serde_json::from_str(SAMPLE_ABI).unwrap();
        let add = abi.function("add").unwrap();
        let payload = add.encode_call(&[1i64.into(), 2i64.into()]).unwrap();
        // 4 byte selector plus two words
        assert_eq!(payload.len(), 4 + 64);
        assert_eq!(payload[..4], derive_method_id("add(int256,int256)"));
        assert_eq!(payload[35], 1);
        assert_eq!(payload[67], 2);
    }

    #[test]
    fn decode_output_of_add() {
        let abi: Abi = serde_json::from_str(SAMPLE_ABI).unwrap();
        let add = abi.function("add").unwrap();
        let mut data = vec![0u8; 32];
        data[31] = 3;
        let tokens = add.decode_output(&data).unwrap();
        assert_eq!(tokens, vec![Token::Int(3u8.into())]);
    }
}
