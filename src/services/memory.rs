use crate::core::filters::{is_candidate_investor, is_candidate_startup};
use crate::models::{Investor, MatchResult, Role, Startup};
use crate::services::store::{ProfileStore, StoreError};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    startups: Vec<Startup>,
    investors: Vec<Investor>,
    matches: Vec<MatchResult>,
}

impl Inner {
    fn remove_pair(&mut self, investor_id: &str, startup_id: &str) -> bool {
        let before = self.matches.len();
        self.matches
            .retain(|m| m.pair_key() != (investor_id, startup_id));
        self.matches.len() != before
    }

    fn upsert(&mut self, result: &MatchResult) {
        let (investor_id, startup_id) = result.pair_key();
        match self
            .matches
            .iter_mut()
            .find(|m| m.pair_key() == (investor_id, startup_id))
        {
            Some(existing) => *existing = result.clone(),
            None => self.matches.push(result.clone()),
        }
    }
}

/// In-process profile store
///
/// Candidate reads follow insertion order. A single lock guards profiles and
/// matches, so every write is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with profiles
    pub fn with_profiles(startups: Vec<Startup>, investors: Vec<Investor>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                startups,
                investors,
                matches: Vec::new(),
            }),
        }
    }

    /// Insert or overwrite a startup profile
    pub async fn put_startup(&self, startup: Startup) {
        let mut inner = self.inner.write().await;
        match inner.startups.iter_mut().find(|s| s.id == startup.id) {
            Some(existing) => *existing = startup,
            None => inner.startups.push(startup),
        }
    }

    /// Insert or overwrite an investor profile
    pub async fn put_investor(&self, investor: Investor) {
        let mut inner = self.inner.write().await;
        match inner.investors.iter_mut().find(|i| i.id == investor.id) {
            Some(existing) => *existing = investor,
            None => inner.investors.push(investor),
        }
    }

    /// Every stored match row, in write order
    pub async fn all_matches(&self) -> Vec<MatchResult> {
        self.inner.read().await.matches.clone()
    }
}

#[async_trait::async_trait]
impl ProfileStore for MemoryStore {
    async fn get_startup(&self, id: &str) -> Result<Option<Startup>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.startups.iter().find(|s| s.id == id).cloned())
    }

    async fn get_investor(&self, id: &str) -> Result<Option<Investor>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.investors.iter().find(|i| i.id == id).cloned())
    }

    async fn candidate_startups(&self) -> Result<Vec<Startup>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .startups
            .iter()
            .filter(|s| is_candidate_startup(s))
            .cloned()
            .collect())
    }

    async fn candidate_investors(&self) -> Result<Vec<Investor>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .investors
            .iter()
            .filter(|i| is_candidate_investor(i))
            .cloned()
            .collect())
    }

    async fn delete_match(&self, investor_id: &str, startup_id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.remove_pair(investor_id, startup_id))
    }

    async fn insert_matches(&self, matches: &[MatchResult]) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for m in matches {
            inner.upsert(m);
        }
        Ok(())
    }

    async fn replace_matches(&self, matches: &[MatchResult]) -> Result<(), StoreError> {
        if matches.is_empty() {
            return Ok(());
        }

        let mut inner = self.inner.write().await;
        for m in matches {
            let (investor_id, startup_id) = m.pair_key();
            inner.remove_pair(investor_id, startup_id);
        }
        for m in matches {
            inner.upsert(m);
        }
        Ok(())
    }

    async fn stored_matches(&self, role: Role, id: &str) -> Result<Vec<MatchResult>, StoreError> {
        let inner = self.inner.read().await;
        let mut matches: Vec<MatchResult> = inner
            .matches
            .iter()
            .filter(|m| m.id_for(role) == id)
            .cloned()
            .collect();

        matches.sort_by(|a, b| {
            b.match_percentage()
                .cmp(&a.match_percentage())
                .then_with(|| a.id_for(role.opposite()).cmp(b.id_for(role.opposite())))
        });

        Ok(matches)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
