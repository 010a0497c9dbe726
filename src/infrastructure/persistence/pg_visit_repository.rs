//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct VisitRow {
    id: Uuid,
    short_link_id: Uuid,
    ip_address: String,
    user_agent: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// PostgreSQL repository for visit records.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn create(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let r = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (id, short_link_id, ip_address, user_agent)
            VALUES ($1, $2, $3, $4)
            RETURNING id, short_link_id, ip_address, user_agent, created_at, updated_at
            "#,
        )
        .bind(new_visit.id)
        .bind(new_visit.short_link_id)
        .bind(new_visit.ip_address)
        .bind(new_visit.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Visit {
            id: r.id,
            short_link_id: r.short_link_id,
            ip_address: r.ip_address,
            user_agent: r.user_agent,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visits")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_for_short_link(&self, short_link_id: Uuid) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visits WHERE short_link_id = $1")
                .bind(short_link_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}
