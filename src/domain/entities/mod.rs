//! Core domain entities.
//!
//! Entities are plain data structures. Each one has a companion `New*` struct
//! used for inserts; identifiers are UUIDs chosen by the caller.
//!
//! - [`User`] - An account that owns short links
//! - [`ShortLink`] - A short code pointing at a target URL, with an expiry
//! - [`Visit`] - One recorded access to a short link
//! - [`BannedDomain`] - A disallowed URL pattern

pub mod banned_domain;
pub mod short_link;
pub mod user;
pub mod visit;

pub use banned_domain::{BannedDomain, NewBannedDomain};
pub use short_link::{NewShortLink, ShortLink, ShortLinkPatch};
pub use user::{NewUser, User};
pub use visit::{NewVisit, Visit};
