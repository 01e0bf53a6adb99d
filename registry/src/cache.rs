use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use tracing::{debug, trace};

/// The map is never swept for dead entries while it is smaller than this.
const MIN_SWEEP_THRESHOLD: usize = 32;

/// A concurrent cache that hands out at most one live value per key.
///
/// The cache only holds weak references to the values it creates, so it never
/// keeps a value alive by itself. Once every owner of a value drops it, the
/// next request for the same key creates a fresh one.
///
/// Lookups take a shared lock; creation takes the exclusive lock and checks
/// again before inserting, so concurrent first requests for the same key all
/// observe the same value.
pub struct UniquenessCache<V> {
    state: RwLock<CacheState<V>>,
    make: fn(&str) -> V,
}

struct CacheState<V> {
    map: HashMap<Box<str>, Weak<V>>,
    sweep_at: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of entries in the map, dead ones included.
    pub entries: usize,
    /// Number of entries whose value is still owned somewhere.
    pub live: usize,
}

impl<V> UniquenessCache<V> {
    pub fn new(make: fn(&str) -> V) -> Self {
        Self {
            state: RwLock::new(CacheState {
                map: HashMap::new(),
                sweep_at: MIN_SWEEP_THRESHOLD,
            }),
            make,
        }
    }

    /// Returns the live value for `key`, creating it if there is none.
    pub fn get_or_create(&self, key: &str) -> Arc<V> {
        match self.get(key) {
            Some(value) => value,
            None => self.create(key),
        }
    }

    /// Returns the live value for `key`, without ever creating one.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let state = self
            .state
            .read()
            .expect("should be able to acquire the cache read lock");
        state.map.get(key).and_then(Weak::upgrade)
    }

    fn create(&self, key: &str) -> Arc<V> {
        let mut state = self
            .state
            .write()
            .expect("should be able to acquire the cache write lock");

        // Another thread may have created the value while we were waiting.
        if let Some(value) = state.map.get(key).and_then(Weak::upgrade) {
            return value;
        }

        // The old key must go together with its dead value: overwriting only
        // the value would keep a key that no live value shares.
        if state.map.remove(key).is_some() {
            trace!(key, "replacing collected cache entry");
        }

        let value = Arc::new((self.make)(key));
        state.map.insert(Box::from(key), Arc::downgrade(&value));
        trace!(key, entries = state.map.len(), "created cache entry");

        if state.map.len() >= state.sweep_at {
            state.sweep();
        }
        value
    }

    pub fn stats(&self) -> CacheStats {
        let state = self
            .state
            .read()
            .expect("should be able to acquire the cache read lock");
        CacheStats {
            entries: state.map.len(),
            live: state
                .map
                .values()
                .filter(|value| value.strong_count() > 0)
                .count(),
        }
    }

    /// Number of entries, including the ones whose value has been dropped.
    pub fn len(&self) -> usize {
        self.state
            .read()
            .expect("should be able to acquire the cache read lock")
            .map
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> CacheState<V> {
    // Only drops entries whose value is already gone. Runs under the write lock
    // once the map has doubled since the previous sweep.
    fn sweep(&mut self) {
        let before = self.map.len();
        self.map.retain(|_, value| value.strong_count() > 0);
        let after = self.map.len();
        self.sweep_at = (after * 2).max(MIN_SWEEP_THRESHOLD);
        debug!(
            removed = before - after,
            retained = after,
            "swept collected cache entries"
        );
    }
}

impl<V> fmt::Debug for UniquenessCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("UniquenessCache")
            .field("entries", &stats.entries)
            .field("live", &stats.live)
            .finish()
    }
}
