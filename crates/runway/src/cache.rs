//! Time-bounded memoisation of engine contexts
//!
//! Entries are keyed by a fingerprint of whatever produced them and expire
//! after a fixed TTL. An expired entry is never served; the next lookup
//! recomputes it. Callers pass `now` explicitly so expiry is testable.

use std::collections::hash_map::Entry;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHasher};

/// Default time-to-live for cached contexts
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Stable 64-bit fingerprint of a hashable key
pub fn fingerprint<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    built_at: Instant,
    value: T,
}

#[derive(Debug, Clone)]
pub struct ContextCache<T> {
    ttl: Duration,
    entries: FxHashMap<u64, CacheEntry<T>>,
}

impl<T> Default for ContextCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<T> ContextCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: FxHashMap::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry<T>, now: Instant) -> bool {
        now.saturating_duration_since(entry.built_at) < self.ttl
    }

    /// The cached value for `key` if it has not expired
    pub fn get(&self, key: u64, now: Instant) -> Option<&T> {
        self.entries
            .get(&key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: u64, value: T, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                built_at: now,
                value,
            },
        );
    }

    /// Return the fresh entry for `key`, building and storing it when missing
    /// or expired. A failed build leaves the cache untouched.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: u64,
        now: Instant,
        build: impl FnOnce() -> Result<T, E>,
    ) -> Result<&T, E> {
        let ttl = self.ttl;
        let entry = match self.entries.entry(key) {
            Entry::Occupied(occupied)
                if now.saturating_duration_since(occupied.get().built_at) < ttl =>
            {
                tracing::trace!(key, "context cache hit");
                occupied.into_mut()
            }
            Entry::Occupied(mut occupied) => {
                tracing::debug!(key, "context cache entry expired, rebuilding");
                occupied.insert(CacheEntry {
                    built_at: now,
                    value: build()?,
                });
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => {
                tracing::debug!(key, "context cache miss");
                vacant.insert(CacheEntry {
                    built_at: now,
                    value: build()?,
                })
            }
        };
        Ok(&entry.value)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.built_at) < ttl);
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_served() {
        let start = Instant::now();
        let mut cache = ContextCache::default();
        cache.insert(1, "context", start);

        assert_eq!(cache.get(1, start + Duration::from_secs(60)), Some(&"context"));
        assert_eq!(cache.get(2, start), None);
    }

    #[test]
    fn test_expired_entry_not_served() {
        let start = Instant::now();
        let mut cache = ContextCache::new(Duration::from_secs(300));
        cache.insert(1, 10, start);

        assert_eq!(cache.get(1, start + Duration::from_secs(299)), Some(&10));
        assert_eq!(cache.get(1, start + Duration::from_secs(300)), None);
    }

    #[test]
    fn test_get_or_insert_rebuilds_after_expiry() {
        let start = Instant::now();
        let mut cache = ContextCache::new(Duration::from_secs(300));
        let mut builds = 0;

        for offset in [0, 100, 200] {
            let value = cache
                .get_or_try_insert_with(7, start + Duration::from_secs(offset), || {
                    builds += 1;
                    Ok::<_, ()>(builds)
                })
                .copied();
            assert_eq!(value, Ok(1));
        }
        assert_eq!(builds, 1);

        let later = start + Duration::from_secs(301);
        let value = cache
            .get_or_try_insert_with(7, later, || {
                builds += 1;
                Ok::<_, ()>(builds)
            })
            .copied();
        assert_eq!(value, Ok(2));
    }

    #[test]
    fn test_failed_build_not_cached() {
        let now = Instant::now();
        let mut cache: ContextCache<u32> = ContextCache::default();

        let err = cache.get_or_try_insert_with(3, now, || Err("engine failed"));
        assert_eq!(err, Err("engine failed"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let start = Instant::now();
        let mut cache = ContextCache::new(Duration::from_secs(10));
        cache.insert(1, 'a', start);
        cache.insert(2, 'b', start + Duration::from_secs(8));

        assert_eq!(cache.purge_expired(start + Duration::from_secs(12)), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(2, start + Duration::from_secs(12)).is_some());
    }

    #[test]
    fn test_fingerprint_distinguishes_keys() {
        assert_eq!(fingerprint("base"), fingerprint("base"));
        assert_ne!(fingerprint("base"), fingerprint("bull"));
    }
}
