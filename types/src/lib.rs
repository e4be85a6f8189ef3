//! Fundamental types for the Soroban pool client.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! amounts, keys, addresses, hashes, networks, contract argument values and
//! transaction status.

pub mod account;
pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod invocation;
pub mod keys;
pub mod network;
pub mod status;
pub mod time;
pub mod value;

pub use account::Account;
pub use address::{Address, ContractId};
pub use amount::{Amount, STROOPS_PER_UNIT};
pub use error::{AmountError, TypesError};
pub use hash::TxHash;
pub use invocation::ContractInvocationRequest;
pub use keys::{KeyPair, PublicKey, SecretKey, Signature};
pub use network::Network;
pub use status::TransactionStatus;
pub use time::{Clock, SystemClock, Timestamp};
pub use value::ContractValue;
