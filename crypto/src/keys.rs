//! Ed25519 key pair reconstruction.

use ed25519_dalek::SigningKey;
use soro_types::{KeyPair, PublicKey, SecretKey};

use crate::error::CryptoError;

/// Derive the public key from a secret key.
pub fn public_from_secret(secret: &SecretKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&secret.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}

/// Reconstruct a full key pair from a secret key.
pub fn keypair_from_secret(secret: SecretKey) -> KeyPair {
    let public = public_from_secret(&secret);
    KeyPair { public, secret }
}

/// Derive a key pair from a raw 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    keypair_from_secret(SecretKey(*seed))
}

/// Parse an `S...` secret seed into a key pair.
pub fn keypair_from_secret_seed(seed: &str) -> Result<KeyPair, CryptoError> {
    let secret = SecretKey::from_secret_seed(seed).map_err(|_| CryptoError::InvalidSecretSeed)?;
    Ok(keypair_from_secret(secret))
}
