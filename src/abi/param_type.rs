use crate::Error;
use std::fmt;
use std::str::FromStr;

/// A parameter type tag parsed from the "type" strings of a contract
/// ABI spec.
///
/// https://solidity.readthedocs.io/en/develop/abi-spec.html#abi-json
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Address,
    Bool,
    Bytes,
    String,
    FixedBytes(usize),
    Uint(usize),
    Int(usize),
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
}

impl ParamType {
    /// Whether the encoded form lives in the tail section rather than
    /// occupying a fixed 32 byte head slot.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    /// Writes the canonical type name, the form used when deriving
    /// function signatures ("int" and "uint" aliases are expanded).
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::String => write!(f, "string"),
            ParamType::FixedBytes(size) => write!(f, "bytes{size}"),
            ParamType::Uint(size) => write!(f, "uint{size}"),
            ParamType::Int(size) => write!(f, "int{size}"),
            ParamType::Array(inner) => write!(f, "{inner}[]"),
            ParamType::FixedArray(inner, size) => write!(f, "{inner}[{size}]"),
        }
    }
}

fn parse_size(s: &str, what: &str) -> Result<usize, Error> {
    s.parse()
        .map_err(|_| Error::EncodingError(format!("bad {what} size in ABI type")))
}

impl FromStr for ParamType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // array suffixes nest from the right, "uint8[2][]" is a dynamic
        // array of fixed arrays
        if let Some(prefix) = s.strip_suffix("[]") {
            return Ok(ParamType::Array(Box::new(prefix.parse()?)));
        }
        if let Some(prefix) = s.strip_suffix(']') {
            let open = prefix
                .rfind('[')
                .ok_or_else(|| Error::EncodingError(format!("unbalanced brackets in {s:?}")))?;
            let len = parse_size(&prefix[open + 1..], "array")?;
            return Ok(ParamType::FixedArray(
                Box::new(prefix[..open].parse()?),
                len,
            ));
        }

        match s {
            "address" => Ok(ParamType::Address),
            "bool" => Ok(ParamType::Bool),
            "bytes" => Ok(ParamType::Bytes),
            "string" => Ok(ParamType::String),
            "uint" => Ok(ParamType::Uint(256)),
            "int" => Ok(ParamType::Int(256)),
            _ => {
                if let Some(size) = s.strip_prefix("bytes") {
                    let size = parse_size(size, "bytes")?;
                    if size == 0 || size > 32 {
                        return Err(Error::EncodingError(format!(
                            "bytes{size} is out of range"
                        )));
                    }
                    Ok(ParamType::FixedBytes(size))
                } else if let Some(size) = s.strip_prefix("uint") {
                    let size = parse_size(size, "uint")?;
                    if size == 0 || size > 256 || size % 8 != 0 {
                        return Err(Error::EncodingError(format!("uint{size} is out of range")));
                    }
                    Ok(ParamType::Uint(size))
                } else if let Some(size) = s.strip_prefix("int") {
                    let size = parse_size(size, "int")?;
                    if size == 0 || size > 256 || size % 8 != 0 {
                        return Err(Error::EncodingError(format!("int{size} is out of range")));
                    }
                    Ok(ParamType::Int(size))
                } else {
                    Err(Error::EncodingError(format!(
                        "unsupported parameter type {s:?}"
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_types() {
        assert_eq!("address".parse::<ParamType>().unwrap(), ParamType::Address);
        assert_eq!("bool".parse::<ParamType>().unwrap(), ParamType::Bool);
        assert_eq!("bytes".parse::<ParamType>().unwrap(), ParamType::Bytes);
        assert_eq!("string".parse::<ParamType>().unwrap(), ParamType::String);
        assert_eq!("bytes32".parse::<ParamType>().unwrap(), ParamType::FixedBytes(32));
        assert_eq!("uint8".parse::<ParamType>().unwrap(), ParamType::Uint(8));
        assert_eq!("int32".parse::<ParamType>().unwrap(), ParamType::Int(32));
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("uint".parse::<ParamType>().unwrap(), ParamType::Uint(256));
        assert_eq!("int".parse::<ParamType>().unwrap(), ParamType::Int(256));
    }

    #[test]
    fn parse_arrays() {
        assert_eq!(
            "uint256[]".parse::<ParamType>().unwrap(),
            ParamType::Array(Box::new(ParamType::Uint(256)))
        );
        assert_eq!(
            "bytes3[2]".parse::<ParamType>().unwrap(),
            ParamType::FixedArray(Box::new(ParamType::FixedBytes(3)), 2)
        );
        assert_eq!(
            "uint8[2][]".parse::<ParamType>().unwrap(),
            ParamType::Array(Box::new(ParamType::FixedArray(
                Box::new(ParamType::Uint(8)),
                2
            )))
        );
    }

    #[test]
    fn reject_bad_types() {
        assert!("uint2".parse::<ParamType>().is_err());
        assert!("uint0".parse::<ParamType>().is_err());
        assert!("bytes33".parse::<ParamType>().is_err());
        assert!("tuple".parse::<ParamType>().is_err());
        assert!("uint256[".parse::<ParamType>().is_err());
    }

    #[test]
    fn canonical_names() {
        assert_eq!("int".parse::<ParamType>().unwrap().to_string(), "int256");
        assert_eq!(
            "uint8[2][]".parse::<ParamType>().unwrap().to_string(),
            "uint8[2][]"
        );
    }

    #[test]
    fn dynamic_detection() {
        assert!("bytes".parse::<ParamType>().unwrap().is_dynamic());
        assert!("string[3]".parse::<ParamType>().unwrap().is_dynamic());
        assert!(!"bytes3[2]".parse::<ParamType>().unwrap().is_dynamic());
        assert!(!"uint256".parse::<ParamType>().unwrap().is_dynamic());
    }
}
