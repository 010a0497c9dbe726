//! Shared state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::application::services::{
    BannedDomainService, ShortLinkService, UserService, VisitService,
};
use crate::domain::listing::PageLimits;
use crate::infrastructure::persistence::{
    PgBannedDomainRepository, PgShortLinkRepository, PgUserRepository, PgVisitRepository,
};
use crate::jobs::DailySchedule;

pub type PgUserService = UserService<PgUserRepository>;
pub type PgShortLinkService =
    ShortLinkService<PgShortLinkRepository, PgUserRepository, PgBannedDomainRepository>;
pub type PgBannedDomainService = BannedDomainService<PgBannedDomainRepository>;
pub type PgVisitService = VisitService<PgVisitRepository, PgShortLinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub user_service: Arc<PgUserService>,
    pub short_link_service: Arc<PgShortLinkService>,
    pub banned_domain_service: Arc<PgBannedDomainService>,
    pub visit_service: Arc<PgVisitService>,
    pub page_limits: PageLimits,
    /// `None` when the sweeper does not run in this process.
    pub sweep_schedule: Option<DailySchedule>,
}

impl AppState {
    /// Wires repositories and services around one pool.
    pub fn new(
        pool: Arc<PgPool>,
        operation_timeout: Duration,
        page_limits: PageLimits,
        sweep_schedule: Option<DailySchedule>,
    ) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let short_links = Arc::new(PgShortLinkRepository::new(pool.clone()));
        let visits = Arc::new(PgVisitRepository::new(pool.clone()));
        let banned_domains = Arc::new(PgBannedDomainRepository::new(pool.clone()));

        let user_service = UserService::new(users.clone()).with_timeout(operation_timeout);
        let short_link_service =
            ShortLinkService::new(short_links.clone(), users, banned_domains.clone())
                .with_timeout(operation_timeout);
        let banned_domain_service =
            BannedDomainService::new(banned_domains).with_timeout(operation_timeout);
        let visit_service = VisitService::new(visits, short_links).with_timeout(operation_timeout);

        Self {
            pool,
            user_service: Arc::new(user_service),
            short_link_service: Arc::new(short_link_service),
            banned_domain_service: Arc::new(banned_domain_service),
            visit_service: Arc::new(visit_service),
            page_limits,
            sweep_schedule,
        }
    }
}
