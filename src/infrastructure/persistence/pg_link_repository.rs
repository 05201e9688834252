//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// The `links.code` primary key plus the deleted-aware `ON CONFLICT` clause
/// in [`LinkRepository::upsert`] make the database the arbiter of "code
/// already active": an upsert that matches an active row updates nothing and
/// returns no row.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Row mapping kept separate from the domain entity so the domain layer
/// stays free of sqlx derives.
#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    target_url: String,
    deleted: bool,
    total_clicks: i64,
    last_clicked: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.code,
            row.target_url,
            row.deleted,
            row.total_clicks,
            row.last_clicked,
            row.created_at,
        )
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, target_url, deleted, total_clicks, last_clicked, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn upsert(&self, code: &str, target_url: &str) -> Result<Option<Link>, AppError> {
        // The conditional DO UPDATE only fires on soft-deleted rows; an
        // active row swallows the conflict and RETURNING yields nothing,
        // which the service reports as a collision.
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, target_url, deleted, total_clicks, last_clicked, created_at)
            VALUES ($1, $2, FALSE, 0, NULL, NOW())
            ON CONFLICT (code) DO UPDATE
            SET target_url = EXCLUDED.target_url,
                deleted = FALSE,
                total_clicks = 0,
                last_clicked = NULL,
                created_at = NOW()
            WHERE links.deleted = TRUE
            RETURNING code, target_url, deleted, total_clicks, last_clicked, created_at
            "#,
        )
        .bind(code)
        .bind(target_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET total_clicks = total_clicks + 1,
                last_clicked = NOW()
            WHERE code = $1 AND deleted = FALSE
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_deleted(&self, code: &str) -> Result<bool, AppError> {
        // Matches the row whether or not it is already deleted, so deleting
        // twice stays a no-op success and only an unknown code misses.
        let result = sqlx::query("UPDATE links SET deleted = TRUE WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_active(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, target_url, deleted, total_clicks, last_clicked, created_at
            FROM links
            WHERE deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
