//! Per-request submission tracking.
//!
//! Each submission is keyed by a caller-chosen [`RequestId`], so several
//! transactions can be in flight at once and each one's status can be asked
//! for independently. An id is claimed with [`TransactionTracker::reserve`]
//! before any network I/O and only becomes a tracked hash once the node has
//! accepted the transaction.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use soro_types::{TransactionStatus, TxHash};

use crate::error::TxError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedTransaction {
    pub hash: TxHash,
    /// Every status observed for this hash, oldest first.
    pub history: Vec<TransactionStatus>,
}

impl TrackedTransaction {
    pub fn latest(&self) -> Option<TransactionStatus> {
        self.history.last().copied()
    }
}

#[derive(Debug, Default)]
struct Entries {
    submitted: HashMap<RequestId, TrackedTransaction>,
    /// Ids claimed by a submission still on its way to the node.
    reserved: HashSet<RequestId>,
}

#[derive(Debug, Default)]
pub struct TransactionTracker {
    entries: Mutex<Entries>,
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        // A panic while holding the lock cannot leave the maps half-updated.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim `id` for a new submission. Ids are single use: an id that is
    /// already tracked or reserved is rejected.
    ///
    /// The claim is released when the returned [`Reservation`] is dropped
    /// without being completed.
    pub fn reserve(&self, id: RequestId) -> Result<Reservation<'_>, TxError> {
        let mut entries = self.entries();
        if entries.submitted.contains_key(&id) || entries.reserved.contains(&id) {
            return Err(TxError::DuplicateRequest(id));
        }
        entries.reserved.insert(id.clone());
        Ok(Reservation {
            tracker: self,
            id: Some(id),
        })
    }

    /// Record the hash of a new submission in one step.
    pub fn record(&self, id: RequestId, hash: TxHash) -> Result<(), TxError> {
        self.reserve(id)?.complete(hash);
        Ok(())
    }

    /// Whether `id` is tracked or reserved.
    pub fn contains(&self, id: &RequestId) -> bool {
        let entries = self.entries();
        entries.submitted.contains_key(id) || entries.reserved.contains(id)
    }

    /// The accepted hash for `id`; `None` while it is only reserved.
    pub fn hash_of(&self, id: &RequestId) -> Option<TxHash> {
        self.entries().submitted.get(id).map(|t| t.hash)
    }

    /// Append an observed status. Unknown ids are ignored.
    pub fn observe(&self, id: &RequestId, status: TransactionStatus) {
        if let Some(entry) = self.entries().submitted.get_mut(id) {
            entry.history.push(status);
        }
    }

    pub fn get(&self, id: &RequestId) -> Option<TrackedTransaction> {
        self.entries().submitted.get(id).cloned()
    }

    /// Number of accepted submissions.
    pub fn len(&self) -> usize {
        self.entries().submitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().submitted.is_empty()
    }
}

/// A claimed [`RequestId`] awaiting its transaction hash.
#[must_use = "dropping a reservation releases the request id"]
#[derive(Debug)]
pub struct Reservation<'a> {
    tracker: &'a TransactionTracker,
    id: Option<RequestId>,
}

impl Reservation<'_> {
    pub fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    /// Turn the reservation into a tracked submission.
    pub fn complete(mut self, hash: TxHash) {
        if let Some(id) = self.id.take() {
            let mut entries = self.tracker.entries();
            entries.reserved.remove(&id);
            entries.submitted.insert(
                id,
                TrackedTransaction {
                    hash,
                    history: Vec::new(),
                },
            );
        }
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.tracker.entries().reserved.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_independent() {
        let tracker = TransactionTracker::new();
        tracker.record("a".into(), TxHash::new([1; 32])).unwrap();
        tracker.record("b".into(), TxHash::new([2; 32])).unwrap();

        assert_eq!(tracker.hash_of(&"a".into()), Some(TxHash::new([1; 32])));
        assert_eq!(tracker.hash_of(&"b".into()), Some(TxHash::new([2; 32])));
        assert_eq!(tracker.hash_of(&"c".into()), None);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn reused_id_rejected() {
        let tracker = TransactionTracker::new();
        tracker.record("a".into(), TxHash::new([1; 32])).unwrap();
        let err = tracker.record("a".into(), TxHash::new([9; 32])).unwrap_err();
        assert!(matches!(err, TxError::DuplicateRequest(id) if id.as_str() == "a"));
        assert_eq!(tracker.hash_of(&"a".into()), Some(TxHash::new([1; 32])));
    }

    #[test]
    fn reserved_id_cannot_be_claimed_twice() {
        let tracker = TransactionTracker::new();
        let id = RequestId::new("dep-1");
        let reservation = tracker.reserve(id.clone()).unwrap();

        assert!(tracker.contains(&id));
        assert_eq!(tracker.hash_of(&id), None);
        assert!(matches!(tracker.reserve(id.clone()), Err(TxError::DuplicateRequest(_))));
        assert!(tracker.record(id.clone(), TxHash::new([2; 32])).is_err());

        reservation.complete(TxHash::new([1; 32]));
        assert_eq!(tracker.hash_of(&id), Some(TxHash::new([1; 32])));
        assert!(tracker.reserve(id).is_err());
    }

    #[test]
    fn dropped_reservation_frees_the_id() {
        let tracker = TransactionTracker::new();
        let id = RequestId::new("dep-1");
        drop(tracker.reserve(id.clone()).unwrap());

        assert!(!tracker.contains(&id));
        assert!(tracker.is_empty());
        tracker.record(id.clone(), TxHash::new([3; 32])).unwrap();
        assert_eq!(tracker.hash_of(&id), Some(TxHash::new([3; 32])));
    }

    #[test]
    fn history_accumulates() {
        let tracker = TransactionTracker::new();
        let id = RequestId::new("dep-1");
        tracker.record(id.clone(), TxHash::new([1; 32])).unwrap();
        tracker.observe(&id, TransactionStatus::NotFound);
        tracker.observe(&id, TransactionStatus::Success);
        tracker.observe(&"other".into(), TransactionStatus::Failed);

        let tracked = tracker.get(&id).unwrap();
        assert_eq!(
            tracked.history,
            vec![TransactionStatus::NotFound, TransactionStatus::Success]
        );
        assert_eq!(tracked.latest(), Some(TransactionStatus::Success));
        assert!(!tracker.contains(&"other".into()));
    }

    #[test]
    fn shared_across_threads() {
        let tracker = std::sync::Arc::new(TransactionTracker::new());
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let tracker = tracker.clone();
                std::thread::spawn(move || {
                    tracker
                        .record(RequestId::new(format!("r{i}")), TxHash::new([i; 32]))
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(tracker.len(), 8);
    }
}
