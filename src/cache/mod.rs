// ABOUTME: Cache abstraction for generated recommendations keyed by profile fingerprint
// ABOUTME: Bounded, insertion-ordered storage with insert-once semantics and FIFO eviction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory cache implementation
pub mod memory;

use async_trait::async_trait;
use nutriplan_core::constants::cache::DEFAULT_CACHE_MAX_ENTRIES;
use nutriplan_core::models::RecommendationRecord;

use crate::recommendations::fingerprint::Fingerprint;

/// Storage for recommendations that were generated and extracted successfully
///
/// Implementations must never hold more than `capacity()` entries, must make
/// `put` a no-op for a key that is already present (first writer wins), and
/// must evict the oldest-inserted entry when a new key arrives at capacity.
///
/// # Examples
///
/// ```rust,no_run
/// use nutriplan_server::cache::{memory::InMemoryCache, CacheConfig, RecommendationCache};
/// use nutriplan_server::models::RecommendationRecord;
/// use nutriplan_server::recommendations::fingerprint::Fingerprint;
/// # async fn example() {
/// let cache = InMemoryCache::new(&CacheConfig::default());
/// let key = Fingerprint::from_hex("00ff");
///
/// assert!(cache.put(key.clone(), RecommendationRecord::empty()).await);
/// // Second insert for the same key is ignored
/// assert!(!cache.put(key.clone(), RecommendationRecord::empty()).await);
/// assert!(cache.get(&key).await.is_some());
/// # }
/// ```
#[async_trait]
pub trait RecommendationCache: Send + Sync {
    /// Look up a record without touching insertion order
    async fn get(&self, key: &Fingerprint) -> Option<RecommendationRecord>;

    /// Insert a record if the key is absent
    ///
    /// Returns `true` when the record was inserted and `false` when the key
    /// was already cached.
    async fn put(&self, key: Fingerprint, value: RecommendationRecord) -> bool;

    /// Whether the key is cached
    async fn contains(&self, key: &Fingerprint) -> bool;

    /// Number of cached records
    async fn len(&self) -> usize;

    /// Whether the cache holds no records
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Maximum number of records held at once
    fn capacity(&self) -> usize;

    /// Drop every record (for tests and operators)
    async fn clear_all(&self);
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries; zero falls back to the default
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}
