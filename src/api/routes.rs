//! API route configuration.

use crate::api::handlers::{
    ban_user_handler, count_link_visits_handler, count_short_links_handler, count_users_handler,
    count_visits_handler, create_banned_domain_handler, create_short_link_handler,
    create_user_handler, delete_banned_domain_handler, delete_short_link_handler,
    delete_user_handler,
    get_short_link_handler, get_user_handler, list_banned_domains_handler,
    list_short_links_handler, list_users_handler, unban_user_handler,
    update_banned_domain_handler, update_short_link_handler, update_user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Admin routes, mounted under `/api/admin`.
///
/// # Endpoints
///
/// - `GET    /users`                        - List users (paged)
/// - `POST   /users`                        - Create a user
/// - `GET    /users/count`                  - Count users
/// - `GET    /users/{id}`                   - Get a user
/// - `PUT    /users/{id}`                   - Update username and email
/// - `DELETE /users/{id}`                   - Delete a user with their links and visits
/// - `POST   /users/{id}/ban`               - Ban a user
/// - `DELETE /users/{id}/ban`               - Unban a user
/// - `GET    /short-links`                  - List short links (paged)
/// - `POST   /short-links`                  - Create a short link
/// - `GET    /short-links/count`            - Count short links
/// - `GET    /short-links/{id}`             - Get a short link
/// - `PUT    /short-links/{id}`             - Update a short link
/// - `DELETE /short-links/{id}`             - Delete a short link and its visits
/// - `GET    /visits/count`                 - Count all visits
/// - `GET    /visits/{short_link_id}/count` - Count visits of one link
/// - `GET    /banned-domains`               - List banned domains (paged)
/// - `POST   /banned-domains`               - Ban a domain
/// - `PUT    /banned-domains/{id}`          - Update a banned domain
/// - `DELETE /banned-domains/{id}`          - Lift a domain ban
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/count", get(count_users_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route(
            "/users/{id}/ban",
            post(ban_user_handler).delete(unban_user_handler),
        )
        .route(
            "/short-links",
            get(list_short_links_handler).post(create_short_link_handler),
        )
        .route("/short-links/count", get(count_short_links_handler))
        .route(
            "/short-links/{id}",
            get(get_short_link_handler)
                .put(update_short_link_handler)
                .delete(delete_short_link_handler),
        )
        .route("/visits/count", get(count_visits_handler))
        .route(
            "/visits/{short_link_id}/count",
            get(count_link_visits_handler),
        )
        .route(
            "/banned-domains",
            get(list_banned_domains_handler).post(create_banned_domain_handler),
        )
        .route(
            "/banned-domains/{id}",
            put(update_banned_domain_handler).delete(delete_banned_domain_handler),
        )
}
