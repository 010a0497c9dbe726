//! Application layer services implementing business logic.
//!
//! Services sit between the HTTP handlers (or the seeding CLI) and the
//! repository traits. Every operation runs under a deadline; store failures
//! are logged here once, with entity and operation context, and then
//! returned unchanged in kind.
//!
//! - [`services::UserService`] - User accounts and bans
//! - [`services::ShortLinkService`] - Short link CRUD and banned-domain screening
//! - [`services::BannedDomainService`] - Banned domain CRUD
//! - [`services::VisitService`] - Visit counters
//! - [`listing`] - The shared page + count pipeline

pub mod deadline;
pub mod listing;
pub mod services;

use crate::error::AppError;

/// Builds an error mapper that logs a failure once and attaches an
/// operation-specific message to store failures.
///
/// Not-found and validation outcomes are expected during normal operation
/// and only logged at debug level.
pub(crate) fn report(
    entity: &'static str,
    operation: &'static str,
    message: &'static str,
) -> impl FnOnce(AppError) -> AppError {
    move |e| {
        let status = e.status_code().as_u16();
        match &e {
            AppError::Internal { .. } => {
                tracing::error!(entity, operation, status, error = %e, "{message}");
            }
            AppError::Timeout { .. } => {
                tracing::warn!(entity, operation, status, error = %e, "{message}");
            }
            _ => {
                tracing::debug!(entity, operation, status, error = %e, "{message}");
            }
        }
        e.with_context(message)
    }
}
