//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Listings are returned as
//! [`crate::domain::listing::Page`] of the matching `*Item` type.

pub mod banned_domain;
pub mod count;
pub mod health;
pub mod pagination;
pub mod short_link;
pub mod user;
