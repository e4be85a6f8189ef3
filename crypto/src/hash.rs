//! SHA-256 hashing for network identifiers and transaction payloads.

use sha2::{Digest, Sha256};
use soro_types::Network;

/// Compute the SHA-256 hash of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Network identifier: the SHA-256 of the network passphrase.
pub fn network_id_for_passphrase(passphrase: &str) -> [u8; 32] {
    sha256(passphrase.as_bytes())
}

/// Network identifier for a known network.
pub fn network_id(network: &Network) -> [u8; 32] {
    network_id_for_passphrase(network.passphrase())
}
