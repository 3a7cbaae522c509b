use crate::models::{MatchResult, Role};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-process cache of stored match lists
///
/// Entries are the rows last read from the profile store for one anchor.
/// Writers invalidate every anchor a replaced pair belongs to; anything
/// else, such as writes from another process, ages out with the TTL.
///
/// Every invalidation bumps a generation counter. A reader that loaded its
/// list before an invalidation never leaves that list behind in the cache.
pub struct MatchCache {
    entries: moka::future::Cache<String, Arc<Vec<MatchResult>>>,
    generation: AtomicU64,
}

impl MatchCache {
    /// Create a new cache
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            entries,
            generation: AtomicU64::new(0),
        }
    }

    /// Current invalidation generation; read it before loading from the store
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Get the cached list for an anchor
    pub async fn get(&self, role: Role, id: &str) -> Option<Arc<Vec<MatchResult>>> {
        let key = CacheKey::matches(role, id);
        let hit = self.entries.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    /// Cache a list loaded at `loaded_at`, unless an invalidation ran since
    ///
    /// Returns whether the entry was kept.
    pub async fn set_if_current(
        &self,
        role: Role,
        id: &str,
        matches: Arc<Vec<MatchResult>>,
        loaded_at: u64,
    ) -> bool {
        if self.generation() != loaded_at {
            return false;
        }

        let key = CacheKey::matches(role, id);
        self.entries.insert(key.clone(), matches).await;

        // An invalidation between the check and the insert may have missed it
        if self.generation() != loaded_at {
            tracing::trace!("Dropping stale cache fill: {}", key);
            self.entries.invalidate(&key).await;
            return false;
        }
        true
    }

    /// Drop the cached lists of both profiles in every pair
    pub async fn invalidate_pairs(&self, matches: &[MatchResult]) {
        for m in matches {
            self.invalidate_pair(m.investor_id(), m.startup_id()).await;
        }
    }

    /// Drop the cached lists of both profiles in one pair
    pub async fn invalidate_pair(&self, investor_id: &str, startup_id: &str) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.entries
            .invalidate(&CacheKey::matches(Role::Investor, investor_id))
            .await;
        self.entries
            .invalidate(&CacheKey::matches(Role::Startup, startup_id))
            .await;
    }

    /// Drop the cached list of one anchor
    pub async fn invalidate(&self, role: Role, id: &str) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.entries.invalidate(&CacheKey::matches(role, id)).await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for an anchor's stored matches
    pub fn matches(role: Role, id: &str) -> String {
        format!("matches:{}:{}", role.as_str().to_lowercase(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchFactors;

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::matches(Role::Startup, "s1"), "matches:startup:s1");
        assert_eq!(CacheKey::matches(Role::Investor, "i1"), "matches:investor:i1");
    }

    #[tokio::test]
    async fn test_invalidate_pair_clears_both_sides() {
        let cache = MatchCache::new(100, 60);
        let result = MatchResult::new("s1", "i1", MatchFactors::default(), 100.0);
        let list = Arc::new(vec![result.clone()]);

        let loaded_at = cache.generation();
        cache.set_if_current(Role::Startup, "s1", list.clone(), loaded_at).await;
        cache.set_if_current(Role::Investor, "i1", list.clone(), loaded_at).await;
        cache.set_if_current(Role::Investor, "i2", list, loaded_at).await;

        cache.invalidate_pairs(&[result]).await;

        assert!(cache.get(Role::Startup, "s1").await.is_none());
        assert!(cache.get(Role::Investor, "i1").await.is_none());
        assert!(cache.get(Role::Investor, "i2").await.is_some());
    }

    #[tokio::test]
    async fn test_fill_after_invalidation_is_dropped() {
        let cache = MatchCache::new(100, 60);
        let list = Arc::new(vec![MatchResult::new("s1", "i1", MatchFactors::default(), 100.0)]);

        let loaded_at = cache.generation();
        cache.invalidate_pair("i1", "s1").await;

        assert!(!cache.set_if_current(Role::Investor, "i1", list.clone(), loaded_at).await);
        assert!(cache.get(Role::Investor, "i1").await.is_none());

        let loaded_at = cache.generation();
        assert!(cache.set_if_current(Role::Investor, "i1", list, loaded_at).await);
        assert!(cache.get(Role::Investor, "i1").await.is_some());
    }
}
