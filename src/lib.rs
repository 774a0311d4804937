//! Client-side contract proxies for Eris/Burrow chains.
//!
//! The crate is a thin layer over the erisdb JSON-RPC namespace: a
//! [`ContractManager`] validates contract definitions up front, the
//! resulting [`Contract`] handles deploy or bind instances, and a
//! [`ContractInstance`] turns ABI entries into typed RPC calls.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod abi;
pub mod address;
pub mod client;
pub mod contracts;
pub mod error;
pub mod jsonrpc;
mod mem;
pub mod types;
pub mod utils;

pub use address::Address;
pub use client::ErisDb;
pub use contracts::{Contract, ContractInstance, ContractManager};
pub use error::Error;
