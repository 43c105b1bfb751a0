//! Per-site visit counters used for affinity scoring.
//!
//! History is owned by the surrounding service and passed into each ranking
//! call. The engine only reads it; a missing entry simply means no affinity.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::warn;

/// Visit counts keyed by site identifier.
///
/// Implementations must serialize concurrent increments so no visit is lost.
/// Reads may be stale.
pub trait VisitHistory: Send + Sync {
    /// Number of recorded visits to `site_id`. Unknown sites return `0`.
    fn visits(&self, site_id: &str) -> u64;

    /// Record one visit to `site_id` and return the updated count.
    fn record_visit(&self, site_id: &str) -> u64;
}

/// Thread-safe, process-lifetime [`VisitHistory`].
///
/// Entries are created on first visit and never evicted.
///
/// # Examples
/// ```
/// use restroom_core::{InMemoryVisitHistory, VisitHistory};
///
/// let history = InMemoryVisitHistory::new();
/// history.record_visit("a1");
/// assert_eq!(history.record_visit("a1"), 2);
/// assert_eq!(history.visits("b2"), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVisitHistory {
    counts: Mutex<HashMap<String, u64>>,
}

impl InMemoryVisitHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history seeded with existing counts.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        Self {
            counts: Mutex::new(counts.into_iter().collect()),
        }
    }

    /// Copy the current counts, ordered by site identifier.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.lock()
            .iter()
            .map(|(id, count)| (id.clone(), *count))
            .collect()
    }

    /// Number of sites with at least one recorded visit.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no visits have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic elsewhere cannot leave a half-applied increment behind, so the
    // map inside a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.counts.lock().unwrap_or_else(|poisoned| {
            warn!("visit history lock was poisoned; continuing with recovered counts");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl VisitHistory for InMemoryVisitHistory {
    fn visits(&self, site_id: &str) -> u64 {
        self.lock().get(site_id).copied().unwrap_or(0)
    }

    /// Blank identifiers are ignored and report `0`.
    fn record_visit(&self, site_id: &str) -> u64 {
        if site_id.trim().is_empty() {
            return 0;
        }
        let mut counts = self.lock();
        let count = counts.entry(site_id.to_owned()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::{sync::Arc, thread};

    #[rstest]
    fn unknown_sites_have_no_visits() {
        let history = InMemoryVisitHistory::new();
        assert_eq!(history.visits("missing"), 0);
        assert!(history.is_empty());
    }

    #[rstest]
    fn record_visit_increments_by_one() {
        let history = InMemoryVisitHistory::new();
        assert_eq!(history.record_visit("a"), 1);
        assert_eq!(history.record_visit("a"), 2);
        assert_eq!(history.record_visit("b"), 1);
        assert_eq!(history.visits("a"), 2);
        assert_eq!(history.len(), 2);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_identifiers_are_ignored(#[case] id: &str) {
        let history = InMemoryVisitHistory::new();
        assert_eq!(history.record_visit(id), 0);
        assert!(history.is_empty());
    }

    #[rstest]
    fn seeded_counts_are_visible_and_saturate() {
        let history = InMemoryVisitHistory::from_counts([("a".to_owned(), u64::MAX)]);
        assert_eq!(history.record_visit("a"), u64::MAX);
        assert_eq!(
            history.snapshot(),
            BTreeMap::from([("a".to_owned(), u64::MAX)])
        );
    }

    #[rstest]
    fn concurrent_increments_are_not_lost() {
        let history = Arc::new(InMemoryVisitHistory::new());
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&history);
                thread::spawn(move || {
                    for _ in 0..250 {
                        shared.record_visit("busy");
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker thread");
        }
        assert_eq!(history.visits("busy"), 2_000);
    }
}
