//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

use super::list_query::{push_order_and_page, push_search};
use crate::domain::entities::{NewShortLink, ShortLink, ShortLinkPatch};
use crate::domain::listing::{ListQuery, ShortLinkSort};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, short_code, target_url, user_id, expires_at, created_at, updated_at";

#[derive(FromRow)]
struct ShortLinkRow {
    id: Uuid,
    short_code: String,
    target_url: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(r: ShortLinkRow) -> Self {
        ShortLink {
            id: r.id,
            short_code: r.short_code,
            target_url: r.target_url,
            user_id: r.user_id,
            expires_at: r.expires_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for short links.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            r#"
            INSERT INTO short_links (id, short_code, target_url, user_id, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new_link.id)
        .bind(new_link.short_code)
        .bind(new_link.target_url)
        .bind(new_link.user_id)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "SELECT {COLUMNS} FROM short_links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn list_ids(&self) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM short_links")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(ids)
    }

    async fn list(&self, query: &ListQuery<ShortLinkSort>) -> Result<Vec<ShortLink>, AppError> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM short_links"));
        push_search(&mut builder, "short_code", query);
        push_order_and_page(&mut builder, query);

        let rows = builder
            .build_query_as::<ShortLinkRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn count_matching(&self, query: &ListQuery<ShortLinkSort>) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM short_links");
        push_search(&mut builder, "short_code", query);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<ShortLink>, AppError> {
        let rows = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "SELECT {COLUMNS} FROM short_links WHERE expires_at < $1 ORDER BY expires_at"
        ))
        .bind(now)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ShortLinkPatch,
    ) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            r#"
            UPDATE short_links SET
                short_code = $2,
                target_url = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.short_code)
        .bind(patch.target_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
