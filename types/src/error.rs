//! Error types shared by the fundamental types.

use thiserror::Error;

/// Errors raised while parsing keys, addresses and hashes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    #[error("invalid contract id: {0}")]
    InvalidContractId(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid secret seed")]
    InvalidSecretSeed,

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Errors raised while converting decimal strings to base units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount contains an invalid character: {0:?}")]
    InvalidCharacter(char),

    #[error("amount has {digits} fractional digits, at most 7 are allowed")]
    ExcessPrecision { digits: usize },

    #[error("amount does not fit in 128 bits")]
    Overflow,

    #[error("amount must be greater than zero")]
    NotPositive,
}
