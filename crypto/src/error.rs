use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid secret seed")]
    InvalidSecretSeed,

    #[error("invalid public key")]
    InvalidPublicKey,
}
