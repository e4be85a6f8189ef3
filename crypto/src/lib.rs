//! Cryptographic primitives for the Soroban pool client.
//!
//! - **Ed25519** for signing transactions and anchor challenges
//! - **SHA-256** for network identifiers and transaction hashes
//! - Key pair reconstruction from `S...` secret seeds

pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use error::CryptoError;
pub use hash::{network_id, network_id_for_passphrase, sha256, sha256_multi};
pub use keys::{keypair_from_secret, keypair_from_secret_seed, keypair_from_seed, public_from_secret};
pub use sign::{sign_message, verify_signature};
