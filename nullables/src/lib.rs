//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! External dependencies (clock, account directory, ledger RPC, classic
//! submission) sit behind traits; this crate provides test-friendly
//! implementations that:
//! - Return deterministic, scriptable values
//! - Record every call for later assertions
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod directory;
pub mod rpc;

pub use clock::NullClock;
pub use directory::{NullAccountDirectory, NullClassicSubmitter};
pub use rpc::{NullLedgerRpc, RpcCall, EMPTY_TX_DATA};
