//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkDraft, LinkPatch};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of `(domain_id, code)` is enforced by a unique index over
/// `(COALESCE(domain_id, 0), code)` — `COALESCE` because two NULL domain ids
/// would otherwise never collide. The insert below relies on that index as
/// its single-writer-wins guarantee.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    space_id: i64,
    domain_id: Option<i64>,
    code: String,
    long_url: String,
    title: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    password_hash: Option<String>,
    is_active: bool,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    pixel_ids: Vec<i64>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            space_id: row.space_id,
            domain_id: row.domain_id,
            code: row.code,
            long_url: row.long_url,
            title: row.title,
            description: row.description,
            tags: row.tags,
            password_hash: row.password_hash,
            is_active: row.is_active,
            expires_at: row.expires_at,
            created_at: row.created_at,
            deleted_at: row.deleted_at,
            pixel_ids: row.pixel_ids,
        }
    }
}

const LINK_COLUMNS: &str = "id, space_id, domain_id, code, long_url, title, description, tags, \
                            password_hash, is_active, expires_at, created_at, deleted_at, pixel_ids";

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, draft: LinkDraft) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links \
             (space_id, domain_id, code, long_url, title, description, tags, \
              password_hash, is_active, expires_at, pixel_ids) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(draft.space_id)
            .bind(draft.domain_id)
            .bind(&draft.code)
            .bind(&draft.long_url)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.tags)
            .bind(&draft.password_hash)
            .bind(draft.is_active)
            .bind(draft.expires_at)
            .bind(&draft.pixel_ids)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, &draft.code, draft.domain_id))?;

        Ok(row.into())
    }

    async fn find_by_code(
        &self,
        domain_id: Option<i64>,
        code: &str,
    ) -> Result<Option<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE code = $1 AND domain_id IS NOT DISTINCT FROM $2 AND deleted_at IS NULL"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .bind(domain_id)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, code, domain_id))?;

        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        domain_id: Option<i64>,
        code: &str,
        patch: LinkPatch,
    ) -> Result<Link, AppError> {
        // Read-modify-write under a row lock so patch application matches the
        // in-memory backend exactly (LinkPatch::apply_to is shared).
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, code, domain_id))?;

        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE code = $1 AND domain_id IS NOT DISTINCT FROM $2 FOR UPDATE"
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code)
            .bind(domain_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, code, domain_id))?;

        let mut link: Link = row
            .map(Into::into)
            .ok_or_else(|| {
                AppError::not_found(
                    "Short link not found",
                    serde_json::json!({ "code": code, "domain_id": domain_id }),
                )
            })?;

        patch.apply_to(&mut link);

        sqlx::query(
            "UPDATE links SET long_url = $2, title = $3, description = $4, tags = $5, \
             password_hash = $6, is_active = $7, expires_at = $8, deleted_at = $9, \
             pixel_ids = $10 WHERE id = $1",
        )
        .bind(link.id)
        .bind(&link.long_url)
        .bind(&link.title)
        .bind(&link.description)
        .bind(&link.tags)
        .bind(&link.password_hash)
        .bind(link.is_active)
        .bind(link.expires_at)
        .bind(link.deleted_at)
        .bind(&link.pixel_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, code, domain_id))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error(e, code, domain_id))?;

        Ok(link)
    }

    async fn soft_delete(&self, domain_id: Option<i64>, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE links SET deleted_at = NOW() \
             WHERE code = $1 AND domain_id IS NOT DISTINCT FROM $2 AND deleted_at IS NULL",
        )
        .bind(code)
        .bind(domain_id)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, code, domain_id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn hard_delete(&self, domain_id: Option<i64>, code: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM links WHERE code = $1 AND domain_id IS NOT DISTINCT FROM $2")
                .bind(code)
                .bind(domain_id)
                .execute(self.pool.as_ref())
                .await
                .map_err(|e| map_sqlx_error(e, code, domain_id))?;

        Ok(result.rows_affected() > 0)
    }
}
