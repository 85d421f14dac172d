//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ClickEvent;
use crate::domain::repositories::ClickRepository;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL sink for click batches.
///
/// A whole batch goes in as one multi-row `INSERT ... SELECT UNNEST(...)`
/// statement, so a flush costs one round trip regardless of batch size.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert_batch(&self, clicks: &[ClickEvent]) -> Result<u64, AppError> {
        if clicks.is_empty() {
            return Ok(0);
        }

        let mut link_ids: Vec<i64> = Vec::with_capacity(clicks.len());
        let mut clicked_ats: Vec<DateTime<Utc>> = Vec::with_capacity(clicks.len());
        let mut ips: Vec<Option<String>> = Vec::with_capacity(clicks.len());
        let mut user_agents: Vec<Option<String>> = Vec::with_capacity(clicks.len());
        let mut referers: Vec<Option<String>> = Vec::with_capacity(clicks.len());
        let mut countries: Vec<Option<String>> = Vec::with_capacity(clicks.len());
        let mut outcomes: Vec<&'static str> = Vec::with_capacity(clicks.len());

        for click in clicks {
            link_ids.push(click.link_id);
            clicked_ats.push(click.clicked_at);
            ips.push(click.ip.clone());
            user_agents.push(click.user_agent.clone());
            referers.push(click.referer.clone());
            countries.push(click.country.clone());
            outcomes.push(click.outcome.as_str());
        }

        let result = sqlx::query(
            "INSERT INTO link_clicks \
             (link_id, clicked_at, ip, user_agent, referer, country, outcome) \
             SELECT * FROM UNNEST \
             ($1::bigint[], $2::timestamptz[], $3::text[], $4::text[], \
              $5::text[], $6::text[], $7::text[])",
        )
        .bind(&link_ids)
        .bind(&clicked_ats)
        .bind(&ips)
        .bind(&user_agents)
        .bind(&referers)
        .bind(&countries)
        .bind(&outcomes)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, "", None))?;

        Ok(result.rows_affected())
    }
}
