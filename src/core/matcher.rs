use crate::core::scoring::calculate_match_score;
use crate::core::selector::CandidateSelector;
use crate::error::MatchError;
use crate::models::{MatchResult, Role};
use crate::services::{MatchRepository, ProfileStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::sync::OwnedMutexGuard;

/// Minimum match percentage a pair needs to be kept and persisted
pub const MATCH_THRESHOLD: u8 = 20;

/// Keep results at or above the threshold, best first
///
/// The sort is stable: equal percentages keep candidate order.
pub fn rank_matches(results: impl IntoIterator<Item = MatchResult>) -> Vec<MatchResult> {
    let mut kept: Vec<MatchResult> = results
        .into_iter()
        .filter(|m| m.match_percentage() >= MATCH_THRESHOLD)
        .collect();

    kept.sort_by(|a, b| b.match_percentage().cmp(&a.match_percentage()));
    kept
}

type AnchorKey = (Role, String);

/// One async mutex per anchor profile, created on demand
#[derive(Default)]
struct AnchorLocks {
    entries: Mutex<HashMap<AnchorKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl AnchorLocks {
    async fn acquire(&self, role: Role, id: &str) -> AnchorGuard<'_> {
        let key = (role, id.to_string());
        let mutex = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.entry(key.clone()).or_default().clone()
        };

        let guard = mutex.lock_owned().await;

        AnchorGuard {
            locks: self,
            key,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Held for a whole run; drops the map entry once nobody else wants it
struct AnchorGuard<'a> {
    locks: &'a AnchorLocks,
    key: AnchorKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for AnchorGuard<'_> {
    fn drop(&mut self) {
        let mut entries = self.locks.entries.lock().unwrap_or_else(PoisonError::into_inner);
        self.guard.take();

        let idle = entries
            .get(&self.key)
            .map(|mutex| Arc::strong_count(mutex) == 1)
            .unwrap_or(false);
        if idle {
            entries.remove(&self.key);
        }
    }
}

/// Main matching orchestrator
///
/// # Pipeline
/// 1. Load the anchor profile
/// 2. Select the opposite-side candidates
/// 3. Score every candidate, one at a time
/// 4. Drop pairs under [`MATCH_THRESHOLD`] and rank the rest
/// 5. Replace the stored rows for the kept pairs
///
/// Runs for the same anchor are serialized, so concurrent triggers cannot
/// interleave their writes.
pub struct MatchOrchestrator {
    store: Arc<dyn ProfileStore>,
    selector: CandidateSelector,
    repository: MatchRepository,
    locks: AnchorLocks,
}

impl MatchOrchestrator {
    pub fn new(store: Arc<dyn ProfileStore>, repository: MatchRepository) -> Self {
        Self {
            selector: CandidateSelector::new(store.clone()),
            store,
            repository,
            locks: AnchorLocks::default(),
        }
    }

    /// Recompute and persist the match set for a profile
    pub async fn trigger_matching(&self, profile_id: &str, role: Role) -> Result<Vec<MatchResult>, MatchError> {
        let started = Instant::now();
        tracing::info!("Matching triggered for {} {}", role, profile_id);

        let matches = self.find_matches_for(profile_id, role).await?;

        tracing::info!(
            "Computed {} matches for {} {} in {:?}",
            matches.len(),
            role,
            profile_id,
            started.elapsed()
        );

        Ok(matches)
    }

    /// Score an anchor against the opposite population and persist the kept set
    pub async fn find_matches_for(&self, anchor_id: &str, role: Role) -> Result<Vec<MatchResult>, MatchError> {
        let _guard = self.locks.acquire(role, anchor_id).await;

        let matches = match role {
            Role::Startup => self.find_matches_for_startup(anchor_id).await?,
            Role::Investor => self.find_matches_for_investor(anchor_id).await?,
        };

        self.repository.store(role, anchor_id, &matches).await?;

        Ok(matches)
    }

    async fn find_matches_for_startup(&self, startup_id: &str) -> Result<Vec<MatchResult>, MatchError> {
        let startup = self
            .store
            .get_startup(startup_id)
            .await?
            .ok_or_else(|| MatchError::not_found(Role::Startup, startup_id))?;

        let investors = self.selector.investors().await?;
        let total_candidates = investors.len();

        let ranked = rank_matches(
            investors
                .iter()
                .map(|investor| calculate_match_score(investor, &startup)),
        );

        tracing::debug!(
            "Startup {}: {} of {} investors above threshold",
            startup_id,
            ranked.len(),
            total_candidates
        );

        Ok(ranked)
    }

    async fn find_matches_for_investor(&self, investor_id: &str) -> Result<Vec<MatchResult>, MatchError> {
        let investor = self
            .store
            .get_investor(investor_id)
            .await?
            .ok_or_else(|| MatchError::not_found(Role::Investor, investor_id))?;

        let startups = self.selector.startups().await?;
        let total_candidates = startups.len();

        let ranked = rank_matches(
            startups
                .iter()
                .map(|startup| calculate_match_score(&investor, startup)),
        );

        tracing::debug!(
            "Investor {}: {} of {} startups above threshold",
            investor_id,
            ranked.len(),
            total_candidates
        );

        Ok(ranked)
    }
}
