//! Sharded in-memory snapshot cache with LRU eviction and TTL.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

use super::service::SnapshotCache;
use crate::domain::entities::ResolvedSnapshot;

type Key = (Option<i64>, String);

struct Entry {
    snapshot: Arc<ResolvedSnapshot>,
    expires_at: Instant,
    last_used: u64,
}

/// Fixed-capacity in-memory cache for resolved snapshots.
///
/// The key space is split across independently locked shards so concurrent
/// reads and writes only contend when they hash to the same shard; a put or
/// invalidate never blocks a read for an unrelated key. Within a shard,
/// eviction is least-recently-used, driven by a global monotonic use counter.
///
/// TTL is independent of LRU order: an expired entry is a miss even if it is
/// the hottest key in the shard. This bounds staleness after mutations that
/// bypass explicit invalidation (administrative edits straight to storage).
pub struct MemoryCache {
    shards: Vec<Mutex<HashMap<Key, Entry>>>,
    shard_capacity: usize,
    ttl: Duration,
    use_counter: AtomicU64,
}

impl MemoryCache {
    /// Creates a cache with the default shard count of 16.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_shards(capacity, ttl, 16)
    }

    /// Creates a cache with an explicit shard count.
    ///
    /// `capacity` is the total entry budget; each shard gets an equal slice
    /// of it (at least one entry).
    pub fn with_shards(capacity: usize, ttl: Duration, shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shard_capacity = capacity.div_ceil(shard_count).max(1);

        Self {
            shards: (0..shard_count).map(|_| Mutex::new(HashMap::new())).collect(),
            shard_capacity,
            ttl,
            use_counter: AtomicU64::new(0),
        }
    }

    fn shard_for(&self, key: &Key) -> &Mutex<HashMap<Key, Entry>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = (hasher.finish() as usize) % self.shards.len();
        &self.shards[index]
    }

    fn tick(&self) -> u64 {
        self.use_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Evicts until the shard is back under its capacity: expired entries
    /// first, then the least recently used.
    fn enforce_capacity(&self, shard: &mut HashMap<Key, Entry>) {
        if shard.len() <= self.shard_capacity {
            return;
        }

        let now = Instant::now();
        shard.retain(|_, entry| entry.expires_at > now);

        while shard.len() > self.shard_capacity {
            let Some(coldest) = shard
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            debug!(code = %coldest.1, "evicting least recently used snapshot");
            shard.remove(&coldest);
        }
    }
}

impl SnapshotCache for MemoryCache {
    fn get(&self, domain_id: Option<i64>, code: &str) -> Option<Arc<ResolvedSnapshot>> {
        let key = (domain_id, code.to_string());
        let mut shard = self.shard_for(&key).lock().expect("cache shard poisoned");

        match shard.get_mut(&key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                entry.last_used = self.tick();
                Some(entry.snapshot.clone())
            }
            Some(_) => {
                // TTL elapsed while resident: drop and report a miss.
                shard.remove(&key);
                None
            }
            None => None,
        }
    }

    fn put(&self, domain_id: Option<i64>, snapshot: Arc<ResolvedSnapshot>) {
        let key = (domain_id, snapshot.code.clone());
        let entry = Entry {
            snapshot,
            expires_at: Instant::now() + self.ttl,
            last_used: self.tick(),
        };

        let mut shard = self.shard_for(&key).lock().expect("cache shard poisoned");
        shard.insert(key, entry);
        self.enforce_capacity(&mut shard);
    }

    fn invalidate(&self, domain_id: Option<i64>, code: &str) {
        let key = (domain_id, code.to_string());
        let mut shard = self.shard_for(&key).lock().expect("cache shard poisoned");
        shard.remove(&key);
    }
}
