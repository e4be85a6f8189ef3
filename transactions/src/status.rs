//! Transaction status lookups.

use std::time::Duration;

use soro_rpc::LedgerRpc;
use soro_types::{TransactionStatus, TxHash};
use tracing::debug;

use crate::error::TxError;

/// Queries `getTransaction` for submitted hashes. Nothing is cached; every
/// call goes to the node.
pub struct StatusPoller<'a, R> {
    rpc: &'a R,
}

impl<'a, R: LedgerRpc> StatusPoller<'a, R> {
    pub fn new(rpc: &'a R) -> Self {
        Self { rpc }
    }

    /// One lookup. RPC failures are returned, not mapped to a status.
    pub async fn check_status(&self, hash: &TxHash) -> Result<TransactionStatus, TxError> {
        let response = self.rpc.get_transaction(hash).await?;
        let status = TransactionStatus::from_rpc_status(&response.status);
        debug!(%hash, rpc_status = %response.status, status = status.as_str(), "status poll");
        Ok(status)
    }

    /// Poll until the status is terminal, at most `max_polls` times.
    ///
    /// `NotFound` is not terminal here: a freshly submitted transaction is
    /// unknown to the node until it lands in a ledger.
    pub async fn wait_for_terminal(
        &self,
        hash: &TxHash,
        interval: Duration,
        max_polls: u32,
    ) -> Result<TransactionStatus, TxError> {
        for poll in 0..max_polls {
            if poll > 0 {
                tokio::time::sleep(interval).await;
            }
            let status = self.check_status(hash).await?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
        Err(TxError::PollTimeout {
            hash: hash.to_hex(),
            polls: max_polls,
        })
    }
}
