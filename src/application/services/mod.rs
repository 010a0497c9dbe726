//! Business logic services for the application layer.

pub mod banned_domain_service;
pub mod short_link_service;
pub mod user_service;
pub mod visit_service;

pub use banned_domain_service::BannedDomainService;
pub use short_link_service::ShortLinkService;
pub use user_service::UserService;
pub use visit_service::VisitService;
