use crate::models::{DevelopmentStage, Investor, MatchFactors, MatchResult, Role, Startup};
use crate::services::store::{ProfileStore, StoreError};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool, Row};
use std::time::Duration;

const STARTUP_COLUMNS: &str = "id, industry, development_stage, city, keywords";

const INVESTOR_COLUMNS: &str = "id, preferred_industries, excluded_industries, \
    preferred_funding_stages, geographic_focus, value_proposition, \
    involvement_level, typical_check_size";

const MATCH_COLUMNS: &str = "investor_id, startup_id, match_percentage, match_factors";

/// PostgreSQL adapter for the profile store
///
/// Profiles are owned by the onboarding flows; this client only reads them
/// and owns the `matches` table.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn startup_from_row(row: &PgRow) -> Result<Startup, StoreError> {
    let development_stage = row
        .try_get::<Option<String>, _>("development_stage")?
        .map(|stage| stage.parse::<DevelopmentStage>())
        .transpose()
        .map_err(StoreError::Corrupt)?;

    Ok(Startup {
        id: row.try_get("id")?,
        industry: row.try_get("industry")?,
        development_stage,
        city: row.try_get("city")?,
        keywords: row.try_get("keywords")?,
    })
}

fn investor_from_row(row: &PgRow) -> Result<Investor, StoreError> {
    Ok(Investor {
        id: row.try_get("id")?,
        preferred_industries: row.try_get("preferred_industries")?,
        excluded_industries: row.try_get("excluded_industries")?,
        preferred_funding_stages: row.try_get("preferred_funding_stages")?,
        geographic_focus: row.try_get("geographic_focus")?,
        value_proposition: row.try_get("value_proposition")?,
        involvement_level: row.try_get("involvement_level")?,
        typical_check_size: row.try_get("typical_check_size")?,
    })
}

fn match_from_row(row: &PgRow) -> Result<MatchResult, StoreError> {
    let percentage: i16 = row.try_get("match_percentage")?;
    let percentage = u8::try_from(percentage)
        .map_err(|_| StoreError::Corrupt(format!("match percentage out of range: {}", percentage)))?;
    let Json(factors): Json<MatchFactors> = row.try_get("match_factors")?;

    MatchResult::from_parts(
        row.try_get("startup_id")?,
        row.try_get("investor_id")?,
        percentage,
        factors,
    )
    .map_err(StoreError::Corrupt)
}

/// Delete the rows for every pair in the batch with a single statement
async fn delete_pairs(conn: &mut PgConnection, matches: &[MatchResult]) -> Result<u64, StoreError> {
    let (investor_ids, startup_ids): (Vec<String>, Vec<String>) = matches
        .iter()
        .map(|m| (m.investor_id().to_string(), m.startup_id().to_string()))
        .unzip();

    let query = r#"
        DELETE FROM matches
        WHERE (investor_id, startup_id) IN (
            SELECT * FROM UNNEST($1::text[], $2::text[])
        )
    "#;

    let result = sqlx::query(query)
        .bind(&investor_ids)
        .bind(&startup_ids)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Bulk insert, overwriting rows that already exist for a pair
async fn upsert_batch(conn: &mut PgConnection, matches: &[MatchResult]) -> Result<(), StoreError> {
    let mut ids = Vec::with_capacity(matches.len());
    let mut investor_ids = Vec::with_capacity(matches.len());
    let mut startup_ids = Vec::with_capacity(matches.len());
    let mut percentages = Vec::with_capacity(matches.len());
    let mut factors = Vec::with_capacity(matches.len());

    for m in matches {
        ids.push(uuid::Uuid::new_v4());
        investor_ids.push(m.investor_id().to_string());
        startup_ids.push(m.startup_id().to_string());
        percentages.push(i16::from(m.match_percentage()));
        factors.push(serde_json::to_value(m.match_factors()).map_err(|e| StoreError::Corrupt(e.to_string()))?);
    }

    let query = r#"
        INSERT INTO matches (id, investor_id, startup_id, match_percentage, match_factors, computed_at)
        SELECT id, investor_id, startup_id, match_percentage, match_factors, NOW()
        FROM UNNEST($1::uuid[], $2::text[], $3::text[], $4::int2[], $5::jsonb[])
            AS batch(id, investor_id, startup_id, match_percentage, match_factors)
        ON CONFLICT (investor_id, startup_id)
        DO UPDATE SET
            match_percentage = EXCLUDED.match_percentage,
            match_factors = EXCLUDED.match_factors,
            computed_at = EXCLUDED.computed_at
    "#;

    sqlx::query(query)
        .bind(&ids)
        .bind(&investor_ids)
        .bind(&startup_ids)
        .bind(&percentages)
        .bind(&factors)
        .execute(conn)
        .await?;

    Ok(())
}

#[async_trait::async_trait]
impl ProfileStore for PostgresStore {
    async fn get_startup(&self, id: &str) -> Result<Option<Startup>, StoreError> {
        let query = format!("SELECT {} FROM startups WHERE id = $1", STARTUP_COLUMNS);

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(startup_from_row).transpose()
    }

    async fn get_investor(&self, id: &str) -> Result<Option<Investor>, StoreError> {
        let query = format!("SELECT {} FROM investors WHERE id = $1", INVESTOR_COLUMNS);

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(investor_from_row).transpose()
    }

    async fn candidate_startups(&self) -> Result<Vec<Startup>, StoreError> {
        let query = format!(
            "SELECT {} FROM startups \
             WHERE industry IS NOT NULL AND development_stage IS NOT NULL \
             ORDER BY id",
            STARTUP_COLUMNS
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        tracing::debug!("Loaded {} candidate startups", rows.len());

        rows.iter().map(startup_from_row).collect()
    }

    async fn candidate_investors(&self) -> Result<Vec<Investor>, StoreError> {
        let query = format!(
            "SELECT {} FROM investors \
             WHERE cardinality(preferred_industries) > 0 \
                OR cardinality(preferred_funding_stages) > 0 \
                OR cardinality(geographic_focus) > 0 \
             ORDER BY id",
            INVESTOR_COLUMNS
        );

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        tracing::debug!("Loaded {} candidate investors", rows.len());

        rows.iter().map(investor_from_row).collect()
    }

    async fn delete_match(&self, investor_id: &str, startup_id: &str) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM matches
            WHERE investor_id = $1 AND startup_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(investor_id)
            .bind(startup_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_matches(&self, matches: &[MatchResult]) -> Result<(), StoreError> {
        if matches.is_empty() {
            return Ok(());
        }

        let mut conn = self.pool.acquire().await?;
        upsert_batch(&mut conn, matches).await
    }

    async fn replace_matches(&self, matches: &[MatchResult]) -> Result<(), StoreError> {
        if matches.is_empty() {
            return Ok(());
        }

        // Dropping the transaction without commit rolls it back
        let mut tx = self.pool.begin().await?;

        let deleted = delete_pairs(&mut tx, matches).await?;
        upsert_batch(&mut tx, matches).await?;

        tx.commit().await?;

        tracing::debug!(
            "Replaced {} match rows ({} previous rows removed)",
            matches.len(),
            deleted
        );

        Ok(())
    }

    async fn stored_matches(&self, role: Role, id: &str) -> Result<Vec<MatchResult>, StoreError> {
        let query = match role {
            Role::Startup => format!(
                "SELECT {} FROM matches WHERE startup_id = $1 \
                 ORDER BY match_percentage DESC, investor_id",
                MATCH_COLUMNS
            ),
            Role::Investor => format!(
                "SELECT {} FROM matches WHERE investor_id = $1 \
                 ORDER BY match_percentage DESC, startup_id",
                MATCH_COLUMNS
            ),
        };

        let rows = sqlx::query(&query).bind(id).fetch_all(&self.pool).await?;

        rows.iter().map(match_from_row).collect()
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
