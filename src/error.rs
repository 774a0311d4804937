use awc::error::SendRequestError as ActixError;
use std::fmt;
use std::num::ParseIntError;
use std::str::Utf8Error;
use std::time::Duration;

/// Custom error implementation that describes possible
/// error states.
///
/// This is shared by a whole crate.
#[derive(Debug)]
pub enum Error {
    /// A synchronous input validation failure, surfaced before any
    /// network round trip. Never retried.
    InvalidArgument(String),
    /// The node returned something that could not be parsed
    BadResponse(String),
    /// The HTTP request could not be delivered
    FailedToSend(ActixError),
    /// A structured JSON-RPC error object from the node
    JsonRpcError {
        code: i64,
        message: String,
        data: String,
    },
    /// Failure encoding arguments or decoding return values against
    /// the ABI-declared types
    EncodingError(String),
    /// The call itself failed: unknown method, VM exception, or a
    /// response that does not match the contract's declared outputs
    ContractCallError(String),
    InvalidUtf8(Utf8Error),
    InvalidHex(ParseIntError),
    InvalidAddressLength { got: usize, expected: usize },
    NoBlockProduced { time: Duration },
}

impl From<ParseIntError> for Error {
    fn from(error: ParseIntError) -> Self {
        Error::InvalidHex(error)
    }
}

impl From<Utf8Error> for Error {
    fn from(error: Utf8Error) -> Self {
        Error::InvalidUtf8(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(val) => write!(f, "{val}"),
            Error::BadResponse(val) => write!(f, "ErisDB bad response {val}"),
            Error::FailedToSend(val) => write!(f, "ErisDB failed to send {val}"),
            Error::JsonRpcError {
                code,
                message,
                data,
            } => write!(
                f,
                "ErisDB response error code {code} message {message} data {data:?}"
            ),
            Error::EncodingError(val) => write!(f, "ABI encoding error {val}"),
            Error::ContractCallError(val) => {
                write!(f, "Error performing contract call {val}")
            }
            Error::InvalidUtf8(_) => write!(f, "Failed to parse bytes as utf8"),
            Error::InvalidHex(_) => write!(f, "Invalid hex character"),
            Error::InvalidAddressLength { got, expected } => {
                write!(f, "Invalid address length, got {got}, expected {expected}")
            }
            Error::NoBlockProduced { time } => {
                write!(f, "No block was produced for {} seconds", time.as_secs())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidUtf8(inner) => Some(inner),
            Error::InvalidHex(inner) => Some(inner),
            _ => None,
        }
    }
}
