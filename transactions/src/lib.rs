//! Soroban transaction pipeline.
//!
//! A contract call moves through a fixed sequence of states, each only
//! constructible from the previous one:
//!
//! - **Built**: invocation operation wrapped in a transaction at `sequence + 1`
//! - **Simulated**: resource footprint, resource fee and auth entries known
//! - **Finalized**: simulation data attached, fee raised by the resource fee
//! - **Signed**: ed25519 signature over the network-bound payload
//! - **Submitted**: accepted by the RPC node, hash known
//!
//! Status polling and per-request tracking sit on top of the submitted hash.
//! Classic (non-contract) transactions such as trustlines share the builder
//! and the signer.

pub mod builder;
pub mod classic;
pub mod envelope;
pub mod error;
pub mod lifecycle;
pub mod simulation;
pub mod status;
pub mod tracker;

pub use builder::{build_transaction, BASE_FEE};
pub use classic::{build_change_trust, change_trust_operation, TrustlineAsset};
pub use envelope::{
    decorated_signature, envelope_xdr, signature_matches, signature_payload_hash,
    sign_transaction, transaction_hash, unsigned_envelope,
};
pub use error::TxError;
pub use lifecycle::{
    BuiltTransaction, FinalizedTransaction, SendStatus, SignedTransaction, SimulatedTransaction,
    SubmissionResult, RPC_ERROR_STATUS,
};
pub use simulation::SimulationResult;
pub use status::StatusPoller;
pub use tracker::{RequestId, Reservation, TrackedTransaction, TransactionTracker};
