//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Listing queries are assembled with [`sqlx::QueryBuilder`] because the
//! ORDER BY column varies per request; every value is still bound.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgShortLinkRepository`] - Short links and expiry discovery
//! - [`PgVisitRepository`] - Visit records
//! - [`PgBannedDomainRepository`] - Banned domain entries

mod list_query;
pub mod pg_banned_domain_repository;
pub mod pg_short_link_repository;
pub mod pg_user_repository;
pub mod pg_visit_repository;

pub use pg_banned_domain_repository::PgBannedDomainRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
pub use pg_user_repository::PgUserRepository;
pub use pg_visit_repository::PgVisitRepository;
