//! Repository trait definitions for the domain layer.
//!
//! These traits are the persistence gateway: per-entity get, list, count,
//! create, update and delete. Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! A missing record is never an error at this level. Lookups return
//! `Ok(None)` and deletes return `Ok(false)`, leaving the caller to decide
//! whether absence matters.
//!
//! - [`UserRepository`] - User accounts
//! - [`ShortLinkRepository`] - Short links, including expiry discovery
//! - [`VisitRepository`] - Visit counters
//! - [`BannedDomainRepository`] - Banned domain entries

pub mod banned_domain_repository;
pub mod short_link_repository;
pub mod user_repository;
pub mod visit_repository;

pub use banned_domain_repository::BannedDomainRepository;
pub use short_link_repository::ShortLinkRepository;
pub use user_repository::UserRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use banned_domain_repository::MockBannedDomainRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
