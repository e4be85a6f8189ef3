//! Cryptographic key types for account identity and signing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::TypesError;

/// A 32-byte Ed25519 public key, rendered as a `G...` strkey.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a `G...` account id.
    pub fn from_account_id(account_id: &str) -> Result<Self, TypesError> {
        stellar_strkey::ed25519::PublicKey::from_string(account_id)
            .map(|pk| Self(pk.0))
            .map_err(|_| TypesError::InvalidAccountId(account_id.to_string()))
    }

    /// The `G...` account id for this key.
    pub fn account_id(&self) -> String {
        stellar_strkey::ed25519::PublicKey(self.0).to_string()
    }

    /// Last four bytes of the key, used as a signature hint.
    pub fn hint(&self) -> [u8; 4] {
        [self.0[28], self.0[29], self.0[30], self.0[31]]
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.account_id())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.account_id())
    }
}

impl FromStr for PublicKey {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_account_id(s)
    }
}

/// A 32-byte Ed25519 secret seed.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(pub [u8; 32]);

impl SecretKey {
    /// Parse an `S...` secret seed.
    pub fn from_secret_seed(seed: &str) -> Result<Self, TypesError> {
        stellar_strkey::ed25519::PrivateKey::from_string(seed)
            .map(|sk| Self(sk.0))
            .map_err(|_| TypesError::InvalidSecretSeed)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

/// An Ed25519 key pair (public + secret).
///
/// Use `soro_crypto::keypair_from_secret_seed()` or `soro_crypto::keypair_from_secret()`
/// to construct key pairs. This struct is intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub secret: SecretKey,
}
