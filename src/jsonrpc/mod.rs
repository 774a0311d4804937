//! JSON-RPC 2.0 plumbing for the erisdb namespace. Unlike most chain
//! RPCs the erisdb methods take a single named-parameter object rather
//! than a positional array, so the request type is generic over any
//! serializable params struct.

pub mod client;
pub mod request;
pub mod response;
