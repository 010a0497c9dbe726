//! Random record generation for factory seeding.
//!
//! Each function builds one record from a source of randomness. Records that
//! reference a parent draw its id uniformly from the given set.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{NewShortLink, NewUser, NewVisit};
use crate::error::AppError;

/// Lifetime of generated short links, in hours.
pub const FAKE_LINK_LIFETIME_HOURS: i64 = 48;

const WORDS: &[&str] = &[
    "amber", "breeze", "cedar", "delta", "ember", "fjord", "glade", "harbor", "iris", "juniper",
    "kelp", "lumen", "meadow", "nova", "orbit", "pebble", "quartz", "ridge", "summit", "tundra",
];

const HOSTS: &[&str] = &[
    "example.com",
    "example.org",
    "example.net",
    "docs.example.com",
    "shop.example.org",
];

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148",
    "curl/8.7.1",
];

fn word<R: Rng>(rng: &mut R) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("link")
}

/// Picks a parent id, failing when there is none to pick.
fn pick_parent<R: Rng>(ids: &[Uuid], rng: &mut R, parent: &str) -> Result<Uuid, AppError> {
    ids.choose(rng).copied().ok_or_else(|| {
        AppError::bad_request(
            format!("Cannot generate records without existing {parent}s"),
            json!({ "parent": parent }),
        )
    })
}

/// A user with a unique-looking username and matching email.
pub fn fake_user<R: Rng>(rng: &mut R) -> NewUser {
    let username = format!("{}_{}{}", word(rng), word(rng), rng.random_range(1000..100_000));
    let email = format!("{username}@example.com");
    NewUser::new(username, email)
}

/// A short link owned by a user drawn from `user_ids`, expiring
/// [`FAKE_LINK_LIFETIME_HOURS`] after `now`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `user_ids` is empty.
pub fn fake_short_link<R: Rng>(
    user_ids: &[Uuid],
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<NewShortLink, AppError> {
    let user_id = pick_parent(user_ids, rng, "user")?;
    let short_code = format!("{}{}", word(rng), rng.random_range(100..10_000));
    let host = HOSTS.choose(rng).copied().unwrap_or("example.com");
    let target_url = format!("https://{host}/{}/{}", word(rng), word(rng));

    Ok(NewShortLink {
        id: Uuid::new_v4(),
        short_code,
        target_url,
        user_id,
        expires_at: now + Duration::hours(FAKE_LINK_LIFETIME_HOURS),
    })
}

/// A visit to a short link drawn from `short_link_ids`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `short_link_ids` is empty.
pub fn fake_visit<R: Rng>(
    short_link_ids: &[Uuid],
    rng: &mut R,
) -> Result<NewVisit, AppError> {
    let short_link_id = pick_parent(short_link_ids, rng, "short link")?;
    let ip_address = format!(
        "{}.{}.{}.{}",
        rng.random_range(1..=223u8),
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random_range(1..=254u8)
    );
    let user_agent = USER_AGENTS
        .choose(rng)
        .copied()
        .unwrap_or("curl/8.7.1")
        .to_string();

    Ok(NewVisit {
        id: Uuid::new_v4(),
        short_link_id,
        ip_address,
        user_agent,
    })
}
