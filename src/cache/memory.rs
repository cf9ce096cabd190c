// ABOUTME: In-memory cache with TTL entries, lazy expiry and bounded capacity
// ABOUTME: Expired entries are evicted on lookup; overflow evicts the oldest insertion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    data: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(data: V, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Time-boxed in-memory cache keyed by string
///
/// Lookups use `peek`, so recency is never refreshed and capacity overflow
/// evicts the oldest insertion. There is no background sweep: an expired
/// entry stays until the next lookup of its key removes it.
/// Clones share the same store.
#[derive(Clone)]
pub struct TtlCache<V> {
    store: Arc<Mutex<LruCache<String, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Capacity used when zero is configured
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(50) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache holding at most `max_entries` values for `ttl` each
    #[must_use]
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
            ttl,
        }
    }

    /// Configured TTL
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return a live value, evicting the entry if it has expired
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut store = self.store.lock().await;
        let expired = match store.peek(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.data.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            store.pop(key);
            tracing::debug!(key, "Evicted expired cache entry");
        }
        None
    }

    /// Store a value, replacing any previous entry for the key
    pub async fn insert(&self, key: String, value: V) {
        let entry = CacheEntry::new(value, self.ttl);
        let mut store = self.store.lock().await;
        // Re-inserting must not let an old key survive a newer one on overflow
        store.pop(&key);
        store.push(key, entry);
    }

    /// Remove one entry
    pub async fn invalidate(&self, key: &str) {
        self.store.lock().await.pop(key);
    }

    /// Remove every entry
    pub async fn clear(&self) {
        self.store.lock().await.clear();
    }

    /// Number of stored entries, expired ones included until looked up
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}
