//! Transaction status as reported by the ledger RPC.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a submitted transaction.
///
/// `NotFound` means the RPC server has not seen the hash yet; callers that
/// retry treat it like `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    NotFound,
}

impl TransactionStatus {
    /// Map an RPC status string. Every unrecognized string is `Pending`.
    pub fn from_rpc_status(status: &str) -> Self {
        match status {
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            "NOT_FOUND" => Self::NotFound,
            _ => Self::Pending,
        }
    }

    /// Whether the ledger has reached a final verdict.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
