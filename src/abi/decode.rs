use crate::abi::{ParamType, Token};
use crate::Address;
use crate::Error;
use num256::Uint256;

fn word(data: &[u8], slot: usize) -> Result<&[u8], Error> {
    data.get(slot * 32..slot * 32 + 32)
        .ok_or_else(|| Error::EncodingError(format!("return data too short at word {slot}")))
}

fn read_usize(word: &[u8]) -> Result<usize, Error> {
    if word[..24].iter().any(|b| *b != 0) {
        return Err(Error::EncodingError(
            "length or offset does not fit usize".to_string(),
        ));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(buf) as usize)
}

/// Decodes one parameter starting at head `slot`, returning the token
/// and the number of head slots it consumed.
fn decode_param(param: &ParamType, data: &[u8], slot: usize) -> Result<(Token, usize), Error> {
    match param {
        ParamType::Uint(_) => Ok((Token::Uint(Uint256::from_be_bytes(word(data, slot)?)), 1)),
        ParamType::Int(_) => Ok((Token::Int(Uint256::from_be_bytes(word(data, slot)?)), 1)),
        ParamType::Address => {
            let word = word(data, slot)?;
            Ok((Token::Address(Address::from_slice(&word[12..])?), 1))
        }
        ParamType::Bool => Ok((Token::Bool(word(data, slot)?[31] != 0), 1)),
        ParamType::FixedBytes(size) => {
            Ok((Token::FixedBytes(word(data, slot)?[..*size].to_vec()), 1))
        }
        ParamType::Bytes | ParamType::String => {
            let offset = read_usize(word(data, slot)?)?;
            let len_word = data
                .get(offset..offset + 32)
                .ok_or_else(|| Error::EncodingError("dynamic offset out of range".to_string()))?;
            let len = read_usize(len_word)?;
            let bytes = data
                .get(offset + 32..offset + 32 + len)
                .ok_or_else(|| Error::EncodingError("dynamic data out of range".to_string()))?
                .to_vec();
            if let ParamType::String = param {
                let s = String::from_utf8(bytes).map_err(|_| {
                    Error::EncodingError("string return is not valid utf8".to_string())
                })?;
                Ok((Token::String(s), 1))
            } else {
                Ok((Token::Bytes(bytes), 1))
            }
        }
        ParamType::Array(inner) => {
            if inner.is_dynamic() {
                return Err(Error::EncodingError(
                    "arrays of dynamic types are not supported".to_string(),
                ));
            }
            let offset = read_usize(word(data, slot)?)?;
            let tail = data
                .get(offset..)
                .ok_or_else(|| Error::EncodingError("dynamic offset out of range".to_string()))?;
            let len = read_usize(word(tail, 0)?)?;
            let mut tokens = Vec::with_capacity(len);
            for i in 0..len {
                let (token, _) = decode_param(inner, &tail[32..], i)?;
                tokens.push(token);
            }
            Ok((Token::Array(tokens), 1))
        }
        ParamType::FixedArray(inner, size) => {
            if inner.is_dynamic() {
                return Err(Error::EncodingError(
                    "arrays of dynamic types are not supported".to_string(),
                ));
            }
            let mut tokens = Vec::with_capacity(*size);
            let mut consumed = 0;
            for _ in 0..*size {
                let (token, used) = decode_param(inner, data, slot + consumed)?;
                tokens.push(token);
                consumed += used;
            }
            Ok((Token::Array(tokens), consumed))
        }
    }
}

/// Decodes ABI return data against the declared output types.
///
/// The same flat subset is supported as on the encoding side.
pub fn decode_tokens(params: &[ParamType], data: &[u8]) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::with_capacity(params.len());
    let mut slot = 0;
    for param in params {
        let (token, used) = decode_param(param, data, slot)?;
        tokens.push(token);
        slot += used;
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::encode_tokens;
    use crate::utils::hex_str_to_bytes;

    #[test]
    fn decode_single_int() {
        let data = hex_str_to_bytes(
            "0000000000000000000000000000000000000000000000000000000000000003",
        )
        .unwrap();
        let tokens = decode_tokens(&[ParamType::Int(256)], &data).unwrap();
        assert_eq!(tokens, vec![Token::Int(3u8.into())]);
        assert_eq!(tokens[0].as_uint().unwrap(), 3u8.into());
    }

    #[test]
    fn decode_uint_and_bool() {
        let data = hex_str_to_bytes(concat!(
            "0000000000000000000000000000000000000000000000000000000000000045",
            "0000000000000000000000000000000000000000000000000000000000000001"
        ))
        .unwrap();
        let tokens = decode_tokens(&[ParamType::Uint(32), ParamType::Bool], &data).unwrap();
        assert_eq!(tokens, vec![Token::Uint(69u8.into()), Token::Bool(true)]);
    }

    #[test]
    fn decode_address() {
        let data = hex_str_to_bytes(
            "0000000000000000000000001234567890abcdef1234567890abcdef12345678",
        )
        .unwrap();
        let tokens = decode_tokens(&[ParamType::Address], &data).unwrap();
        assert_eq!(
            tokens,
            vec![Token::Address(
                "1234567890ABCDEF1234567890ABCDEF12345678".parse().unwrap()
            )]
        );
    }

    #[test]
    fn decode_string() {
        let data = hex_str_to_bytes(concat!(
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000006",
            "666f6f6261720000000000000000000000000000000000000000000000000000"
        ))
        .unwrap();
        let tokens = decode_tokens(&[ParamType::String], &data).unwrap();
        assert_eq!(tokens, vec![Token::from("foobar")]);
    }

    #[test]
    fn decode_truncated_data() {
        let data = hex_str_to_bytes("00000000000000000000000000000000").unwrap();
        assert!(decode_tokens(&[ParamType::Uint(256)], &data).is_err());
    }

    #[test]
    fn round_trips() {
        let tokens = vec![
            Token::Uint(69u8.into()),
            Token::from("gavofyork"),
            Token::Bool(true),
            Token::Array(vec![1u32.into(), 2u32.into(), 3u32.into()]),
        ];
        let params = [
            ParamType::Uint(256),
            ParamType::String,
            ParamType::Bool,
            ParamType::Array(Box::new(ParamType::Uint(256))),
        ];
        let encoded = encode_tokens(&tokens).unwrap();
        assert_eq!(decode_tokens(&params, &encoded).unwrap(), tokens);
    }
}
