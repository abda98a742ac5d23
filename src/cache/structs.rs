use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::debug;

use crate::domain::ResultSet;

/// Content-derived cache key for one ResultSet snapshot. Any edit to a
/// competition (id, year, scores) changes the hash, so a stale entry can
/// never be served after a data change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    competition_count: usize,
    content_hash: u64,
}

impl Fingerprint {
    pub fn of(result_set: &ResultSet) -> Self {
        let mut hasher = DefaultHasher::new();
        for competition in result_set.competitions() {
            competition.id.hash(&mut hasher);
            competition.year.hash(&mut hasher);
            for (participant, rank) in &competition.scores {
                participant.hash(&mut hasher);
                rank.hash(&mut hasher);
            }
        }
        for participant in result_set.participants() {
            participant.id.hash(&mut hasher);
        }

        Self {
            competition_count: result_set.competitions().len(),
            content_hash: hasher.finish(),
        }
    }
}

struct Entry<T> {
    value: Arc<T>,
    stored_at: Instant,
}

/// TTL-bounded memoization of derived results, keyed by fingerprint.
///
/// Not a correctness boundary: losing an entry only costs a recompute.
/// The interior mutex is held across the compute closure, which serializes
/// recomputation — concurrent callers for the same fingerprint wait and
/// then share the already-computed `Arc` instead of duplicating work.
pub struct ResultCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<Fingerprint, Entry<T>>>,
}

impl<T> ResultCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_or_compute(&self, fingerprint: Fingerprint, compute: impl FnOnce() -> T) -> Arc<T> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");

        if let Some(entry) = entries.get(&fingerprint) {
            if entry.stored_at.elapsed() < self.ttl {
                return Arc::clone(&entry.value);
            }
            debug!("cache entry expired, recomputing");
        }

        let value = Arc::new(compute());
        entries.insert(
            fingerprint,
            Entry {
                value: Arc::clone(&value),
                stored_at: Instant::now(),
            },
        );
        value
    }

    /// Drops every entry. Called by the mutating layer whenever the
    /// underlying ResultSet changes.
    pub fn invalidate(&self) {
        self.entries.lock().expect("cache mutex poisoned").clear();
        debug!("cache invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Competition, Participant, ParticipantStatus};

    use std::collections::BTreeMap;

    fn snapshot(score: u32) -> ResultSet {
        ResultSet::new(
            vec![Participant {
                id: 1,
                display_name: "Anna K".to_string(),
                status: ParticipantStatus::Active,
            }],
            vec![Competition {
                id: 1,
                year: 2020,
                name: "Summer Cup".to_string(),
                location: "Lakeside".to_string(),
                scores: BTreeMap::from([(1, score)]),
                arranger_third: None,
                arranger_second_last: None,
            }],
        )
    }

    #[test]
    fn second_lookup_reuses_the_computed_value() {
        let cache: ResultCache<u32> = ResultCache::new(Duration::from_secs(300));
        let fp = Fingerprint::of(&snapshot(1));
        let mut calls = 0;

        let first = cache.get_or_compute(fp, || {
            calls += 1;
            42
        });
        let second = cache.get_or_compute(fp, || {
            calls += 1;
            99
        });

        assert_eq!(*first, 42);
        assert_eq!(*second, 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn editing_a_score_changes_the_fingerprint() {
        assert_ne!(
            Fingerprint::of(&snapshot(1)),
            Fingerprint::of(&snapshot(2))
        );
    }

    #[test]
    fn identical_snapshots_share_a_fingerprint() {
        assert_eq!(Fingerprint::of(&snapshot(1)), Fingerprint::of(&snapshot(1)));
    }

    #[test]
    fn invalidate_forces_a_recompute() {
        let cache: ResultCache<u32> = ResultCache::new(Duration::from_secs(300));
        let fp = Fingerprint::of(&snapshot(1));
        let mut calls = 0;

        cache.get_or_compute(fp, || {
            calls += 1;
            1
        });
        cache.invalidate();
        cache.get_or_compute(fp, || {
            calls += 1;
            2
        });

        assert_eq!(calls, 2);
    }

    #[test]
    fn expired_entries_recompute() {
        let cache: ResultCache<u32> = ResultCache::new(Duration::ZERO);
        let fp = Fingerprint::of(&snapshot(1));
        let mut calls = 0;

        cache.get_or_compute(fp, || {
            calls += 1;
            1
        });
        cache.get_or_compute(fp, || {
            calls += 1;
            2
        });

        assert_eq!(calls, 2);
    }
}
