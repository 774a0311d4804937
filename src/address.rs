use crate::utils::{bytes_to_hex_str, hex_str_to_bytes};
use crate::Error;
use serde::de::Deserialize;
use serde::de::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LENGTH: usize = 20;

/// Representation of an ErisDB account address.
///
/// On the wire this is 40 hex characters, conventionally upper case and
/// without a `0x` prefix, although both the prefix and lower case are
/// accepted when parsing.
#[derive(PartialEq, Debug, Clone, Copy, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Get raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_slice(data: &[u8]) -> Result<Address, Error> {
        if data.len() != ADDRESS_LENGTH {
            return Err(Error::InvalidAddressLength {
                got: data.len(),
                expected: ADDRESS_LENGTH,
            });
        }
        let mut out = [0u8; ADDRESS_LENGTH];
        out.copy_from_slice(data);
        Ok(Address(out))
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(val: [u8; ADDRESS_LENGTH]) -> Address {
        Address(val)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = match s.strip_prefix("0x") {
            Some(s) => s,
            None => s,
        };
        if s.len() != 2 * ADDRESS_LENGTH {
            return Err(Error::InvalidAddressLength {
                got: s.len(),
                expected: 2 * ADDRESS_LENGTH,
            });
        }
        let bytes = hex_str_to_bytes(s)?;
        Address::from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", bytes_to_hex_str(&self.0).to_uppercase())
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", bytes_to_hex_str(&self.0))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
