use crate::models::{MatchResult, Role};
use crate::services::cache::MatchCache;
use crate::services::store::{ProfileStore, StoreError};
use std::sync::Arc;

/// Replace-on-recompute persistence for match sets
///
/// Sits between the orchestrator and the profile store, and keeps the
/// stored-match cache coherent with what was written.
#[derive(Clone)]
pub struct MatchRepository {
    store: Arc<dyn ProfileStore>,
    cache: Arc<MatchCache>,
}

impl MatchRepository {
    pub fn new(store: Arc<dyn ProfileStore>, cache: Arc<MatchCache>) -> Self {
        Self { store, cache }
    }

    /// Replace the stored rows for every pair in `matches`
    ///
    /// Rows for pairs outside `matches` are left as they are. Empty input is a no-op.
    pub async fn store(&self, anchor_role: Role, anchor_id: &str, matches: &[MatchResult]) -> Result<(), StoreError> {
        if matches.is_empty() {
            tracing::debug!("No matches to store for {} {}", anchor_role, anchor_id);
            return Ok(());
        }

        self.store.replace_matches(matches).await?;

        self.cache.invalidate(anchor_role, anchor_id).await;
        self.cache.invalidate_pairs(matches).await;

        tracing::debug!(
            "Stored {} matches for {} {}",
            matches.len(),
            anchor_role,
            anchor_id
        );

        Ok(())
    }

    /// Latest stored matches for a profile, best first
    pub async fn stored_for(&self, role: Role, id: &str) -> Result<Arc<Vec<MatchResult>>, StoreError> {
        if let Some(cached) = self.cache.get(role, id).await {
            return Ok(cached);
        }

        let loaded_at = self.cache.generation();
        let matches = Arc::new(self.store.stored_matches(role, id).await?);
        self.cache.set_if_current(role, id, matches.clone(), loaded_at).await;

        Ok(matches)
    }

    /// Remove one stored pair
    pub async fn delete(&self, investor_id: &str, startup_id: &str) -> Result<bool, StoreError> {
        let deleted = self.store.delete_match(investor_id, startup_id).await?;
        if deleted {
            self.cache.invalidate_pair(investor_id, startup_id).await;
        }
        Ok(deleted)
    }
}
