use crate::abi::ParamType;
use crate::Address;
use crate::Error;
use num256::Uint256;
use num_traits::Bounded;
use sha3::{Digest, Keccak256};

/// A token represents a value of a parameter of a contract call.
///
/// Signed integers are carried as their two's complement 256 bit word,
/// the same representation the EVM itself uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(Uint256),
    Int(Uint256),
    Address(Address),
    Bool(bool),
    /// Represents a string
    String(String),
    /// Dynamic array of bytes
    Bytes(Vec<u8>),
    /// Fixed size array of bytes
    FixedBytes(Vec<u8>),
    /// Array of tokens of a single type
    Array(Vec<Token>),
}

impl Token {
    /// Checks that a value is usable where the ABI declares `param`.
    pub fn type_check(&self, param: &ParamType) -> bool {
        match (self, param) {
            (Token::Uint(_), ParamType::Uint(_)) => true,
            (Token::Int(_), ParamType::Int(_)) => true,
            (Token::Address(_), ParamType::Address) => true,
            (Token::Bool(_), ParamType::Bool) => true,
            (Token::String(_), ParamType::String) => true,
            (Token::Bytes(_), ParamType::Bytes) => true,
            (Token::FixedBytes(v), ParamType::FixedBytes(size)) => v.len() == *size,
            (Token::Array(v), ParamType::Array(inner)) => {
                v.iter().all(|t| t.type_check(inner))
            }
            (Token::Array(v), ParamType::FixedArray(inner, size)) => {
                v.len() == *size && v.iter().all(|t| t.type_check(inner))
            }
            _ => false,
        }
    }

    /// The raw 256 bit word for numeric tokens, `None` for the rest.
    pub fn as_uint(&self) -> Option<Uint256> {
        match self {
            Token::Uint(v) | Token::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// Representation of a serialized token.
enum SerializedToken {
    /// This data can be appended to the head of the output stream as is
    Static([u8; 32]),
    /// This data is saved up in the tail section, and an offset to it is
    /// appended to the head
    Dynamic(Vec<u8>),
}

fn usize_word(value: usize) -> [u8; 32] {
    let mut res = [0u8; 32];
    res[24..].copy_from_slice(&(value as u64).to_be_bytes());
    res
}

fn pad_right(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    while out.len() % 32 != 0 {
        out.push(0);
    }
    out
}

fn serialize_token(token: &Token) -> Result<SerializedToken, Error> {
    match token {
        Token::Uint(value) | Token::Int(value) => {
            Ok(SerializedToken::Static(value.to_be_bytes()))
        }
        Token::Address(address) => {
            let mut res = [0u8; 32];
            res[12..].copy_from_slice(address.as_bytes());
            Ok(SerializedToken::Static(res))
        }
        Token::Bool(value) => {
            let mut res = [0u8; 32];
            res[31] = *value as u8;
            Ok(SerializedToken::Static(res))
        }
        Token::FixedBytes(value) => {
            if value.len() > 32 {
                return Err(Error::EncodingError(format!(
                    "fixed bytes of length {} do not fit a word",
                    value.len()
                )));
            }
            let mut res = [0u8; 32];
            res[..value.len()].copy_from_slice(value);
            Ok(SerializedToken::Static(res))
        }
        Token::Bytes(value) => {
            let mut res = usize_word(value.len()).to_vec();
            res.extend(pad_right(value));
            Ok(SerializedToken::Dynamic(res))
        }
        Token::String(value) => {
            let mut res = usize_word(value.len()).to_vec();
            res.extend(pad_right(value.as_bytes()));
            Ok(SerializedToken::Dynamic(res))
        }
        Token::Array(tokens) => {
            let mut res = usize_word(tokens.len()).to_vec();
            for token in tokens {
                match serialize_token(token)? {
                    SerializedToken::Static(word) => res.extend(word),
                    SerializedToken::Dynamic(_) => {
                        return Err(Error::EncodingError(
                            "arrays of dynamic types are not supported".to_string(),
                        ))
                    }
                }
            }
            Ok(SerializedToken::Dynamic(res))
        }
    }
}

/// Serializes a list of tokens into ABI call data.
///
/// This is not a full fledged implementation of an ABI encoder, it
/// covers flat parameter lists with dynamic strings, bytes and single
/// level arrays, which is enough to successfully encode a contract
/// call. Nested dynamic types are rejected.
pub fn encode_tokens(tokens: &[Token]) -> Result<Vec<u8>, Error> {
    let serialized = tokens
        .iter()
        .map(serialize_token)
        .collect::<Result<Vec<_>, Error>>()?;

    let head_len = 32 * tokens.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail: Vec<u8> = Vec::new();
    for ser in serialized {
        match ser {
            SerializedToken::Static(word) => head.extend(word),
            SerializedToken::Dynamic(data) => {
                head.extend(usize_word(head_len + tail.len()));
                tail.extend(data);
            }
        }
    }
    head.extend(tail);
    Ok(head)
}

/// Given a signature it derives a method id
pub fn derive_method_id(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    debug_assert!(digest.len() >= 4);
    let mut result: [u8; 4] = Default::default();
    result.copy_from_slice(&digest[0..4]);
    result
}

/// Derives the method id of a canonical signature such as
/// `add(int256,int256)` and appends the encoded arguments.
pub fn encode_call(signature: &str, tokens: &[Token]) -> Result<Vec<u8>, Error> {
    let mut payload = derive_method_id(signature).to_vec();
    payload.extend(encode_tokens(tokens)?);
    Ok(payload)
}

impl From<u8> for Token {
    fn from(v: u8) -> Token {
        Token::Uint(v.into())
    }
}

impl From<u32> for Token {
    fn from(v: u32) -> Token {
        Token::Uint(v.into())
    }
}

impl From<u64> for Token {
    fn from(v: u64) -> Token {
        Token::Uint(v.into())
    }
}

impl From<u128> for Token {
    fn from(v: u128) -> Token {
        Token::Uint(v.into())
    }
}

impl From<Uint256> for Token {
    fn from(v: Uint256) -> Token {
        Token::Uint(v)
    }
}

impl From<i64> for Token {
    fn from(v: i64) -> Token {
        if v < 0 {
            // two's complement word
            let abs: Uint256 = v.unsigned_abs().into();
            Token::Int(Uint256::max_value() - abs + 1u8.into())
        } else {
            Token::Int((v as u64).into())
        }
    }
}

impl From<bool> for Token {
    fn from(v: bool) -> Token {
        Token::Bool(v)
    }
}

impl From<Address> for Token {
    fn from(v: Address) -> Token {
        Token::Address(v)
    }
}

impl From<&str> for Token {
    fn from(v: &str) -> Token {
        Token::String(v.to_string())
    }
}

impl From<String> for Token {
    fn from(v: String) -> Token {
        Token::String(v)
    }
}

impl From<Vec<u8>> for Token {
    fn from(v: Vec<u8>) -> Token {
        Token::Bytes(v)
    }
}
