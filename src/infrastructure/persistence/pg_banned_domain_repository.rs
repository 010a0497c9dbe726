//! PostgreSQL implementation of the banned domain repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

use super::list_query::{push_order_and_page, push_search};
use crate::domain::entities::{BannedDomain, NewBannedDomain};
use crate::domain::listing::{BannedDomainSort, ListQuery};
use crate::domain::repositories::BannedDomainRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, url, created_at, updated_at";

#[derive(FromRow)]
struct BannedDomainRow {
    id: Uuid,
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BannedDomainRow> for BannedDomain {
    fn from(r: BannedDomainRow) -> Self {
        BannedDomain {
            id: r.id,
            url: r.url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for banned domain entries.
pub struct PgBannedDomainRepository {
    pool: Arc<PgPool>,
}

impl PgBannedDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BannedDomainRepository for PgBannedDomainRepository {
    async fn create(&self, new_entry: NewBannedDomain) -> Result<BannedDomain, AppError> {
        let row = sqlx::query_as::<_, BannedDomainRow>(&format!(
            "INSERT INTO banned_domains (id, url) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(new_entry.id)
        .bind(new_entry.url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BannedDomain>, AppError> {
        let row = sqlx::query_as::<_, BannedDomainRow>(&format!(
            "SELECT {COLUMNS} FROM banned_domains WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(BannedDomain::from))
    }

    async fn list_all(&self) -> Result<Vec<BannedDomain>, AppError> {
        let rows = sqlx::query_as::<_, BannedDomainRow>(&format!(
            "SELECT {COLUMNS} FROM banned_domains"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(BannedDomain::from).collect())
    }

    async fn list(
        &self,
        query: &ListQuery<BannedDomainSort>,
    ) -> Result<Vec<BannedDomain>, AppError> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM banned_domains"));
        push_search(&mut builder, "url", query);
        push_order_and_page(&mut builder, query);

        let rows = builder
            .build_query_as::<BannedDomainRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(BannedDomain::from).collect())
    }

    async fn count_matching(&self, query: &ListQuery<BannedDomainSort>) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM banned_domains");
        push_search(&mut builder, "url", query);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: Uuid, url: String) -> Result<Option<BannedDomain>, AppError> {
        let row = sqlx::query_as::<_, BannedDomainRow>(&format!(
            r#"
            UPDATE banned_domains SET url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(BannedDomain::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM banned_domains WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
