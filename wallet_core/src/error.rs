//! Top-level client error and its coarse taxonomy.

use soro_anchor::AnchorError;
use soro_contract::ContractError;
use soro_crypto::CryptoError;
use soro_rpc::RpcError;
use soro_transactions::TxError;
use soro_types::{AmountError, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("key error: {0}")]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Transaction(#[from] TxError),

    #[error(transparent)]
    Anchor(#[from] AnchorError),

    #[error("configuration error: {0}")]
    Config(String),
}

/// What went wrong, independent of which layer noticed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Encoding,
    Simulation,
    SimulationIncomplete,
    Submission,
    Auth,
    Transfer,
    Config,
    NotFound,
}

fn rpc_kind(e: &RpcError) -> ErrorKind {
    if e.is_transport() {
        return ErrorKind::Network;
    }
    match e {
        RpcError::Network(_) => ErrorKind::Network,
        RpcError::AccountNotFound(_) => ErrorKind::NotFound,
        RpcError::Http { .. } => ErrorKind::Submission,
        // The node answered and refused the request itself.
        RpcError::Server { .. } | RpcError::InvalidResponse(_) => ErrorKind::Encoding,
        RpcError::Client(_) => ErrorKind::Config,
    }
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Amount(_) | ClientError::Contract(_) => ErrorKind::Encoding,
            ClientError::Types(_) | ClientError::Crypto(_) | ClientError::Config(_) => {
                ErrorKind::Config
            }
            ClientError::Rpc(e) => rpc_kind(e),
            ClientError::Transaction(e) => match e {
                TxError::Contract(_) | TxError::Xdr(_) | TxError::FeeOverflow(_) => {
                    ErrorKind::Encoding
                }
                TxError::Rpc(e) => rpc_kind(e),
                TxError::Simulation(_) => ErrorKind::Simulation,
                TxError::SimulationIncomplete(_) => ErrorKind::SimulationIncomplete,
                TxError::Submission { .. } | TxError::DuplicateRequest(_) => {
                    ErrorKind::Submission
                }
                TxError::InvalidAsset(_) => ErrorKind::Config,
                TxError::PollTimeout { .. } => ErrorKind::Network,
            },
            ClientError::Anchor(e) => match e {
                AnchorError::Discovery(_) | AnchorError::Client(_) => ErrorKind::Config,
                AnchorError::Auth(_) => ErrorKind::Auth,
                AnchorError::UnsupportedAsset(_)
                | AnchorError::MissingField(_)
                | AnchorError::Transfer { .. } => ErrorKind::Transfer,
                AnchorError::Network(_) => ErrorKind::Network,
                AnchorError::InvalidResponse(_) => ErrorKind::Encoding,
            },
        }
    }

    /// Whether repeating the same call later may succeed.
    ///
    /// Nothing in the client retries on its own; this is for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transaction(TxError::Submission { status, .. }) => {
                status == "TRY_AGAIN_LATER"
            }
            other => other.kind() == ErrorKind::Network,
        }
    }
}
