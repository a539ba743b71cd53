// ABOUTME: In-memory recommendation cache with strict FIFO eviction
// ABOUTME: Wraps an LruCache that is never promoted, so recency order equals insertion order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, RecommendationCache};
use crate::recommendations::fingerprint::Fingerprint;
use async_trait::async_trait;
use lru::LruCache;
use nutriplan_core::constants::cache::DEFAULT_CACHE_MAX_ENTRIES;
use nutriplan_core::models::RecommendationRecord;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory cache shared by every request handler
///
/// Uses `Arc<RwLock<LruCache>>` so clones share one store. Reads go through
/// `peek` under a read lock and never promote an entry, which keeps the LRU
/// order identical to insertion order; `push` therefore always evicts the
/// oldest-inserted entry. `put` holds the write lock across its presence
/// check and insert.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<LruCache<Fingerprint, RecommendationRecord>>>,
    capacity: NonZeroUsize,
}

impl InMemoryCache {
    /// Default cache capacity when config specifies zero entries
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CACHE_MAX_ENTRIES)
    {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create an empty cache
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        // LruCache requires NonZeroUsize for capacity
        let capacity =
            NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);

        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            capacity,
        }
    }

    /// Cached keys, oldest insertion first
    pub async fn keys(&self) -> Vec<Fingerprint> {
        // LruCache iterates most-recent first
        self.store
            .read()
            .await
            .iter()
            .rev()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[async_trait]
impl RecommendationCache for InMemoryCache {
    async fn get(&self, key: &Fingerprint) -> Option<RecommendationRecord> {
        self.store.read().await.peek(key).cloned()
    }

    async fn put(&self, key: Fingerprint, value: RecommendationRecord) -> bool {
        let mut store = self.store.write().await;

        if store.contains(&key) {
            drop(store);
            debug!(fingerprint = %key, "Recommendation already cached, keeping first entry");
            return false;
        }

        let evicted = store.push(key, value);
        let size = store.len();
        drop(store);

        if let Some((old_key, _)) = evicted {
            debug!(evicted = %old_key, size, "Evicted oldest cached recommendation");
        }
        true
    }

    async fn contains(&self, key: &Fingerprint) -> bool {
        self.store.read().await.contains(key)
    }

    async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    fn capacity(&self) -> usize {
        self.capacity.get()
    }

    async fn clear_all(&self) {
        self.store.write().await.clear();
    }
}
