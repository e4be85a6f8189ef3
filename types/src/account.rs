//! Ledger account snapshot.

use serde::{Deserialize, Serialize};

use crate::keys::PublicKey;

/// An account's id and its sequence number at the time it was fetched.
///
/// Sequence numbers are server-authoritative. Fetch a fresh `Account` right
/// before building each transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: PublicKey,
    pub sequence: i64,
}

impl Account {
    pub fn new(id: PublicKey, sequence: i64) -> Self {
        Self { id, sequence }
    }

    /// Sequence number the next transaction from this account must carry.
    pub fn next_sequence(&self) -> i64 {
        self.sequence.saturating_add(1)
    }
}
