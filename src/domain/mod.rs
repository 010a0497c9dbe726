//! Domain layer containing business entities and contracts.
//!
//! It defines entities, listing types and repository interfaces independent
//! of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`listing`] - Paging, search and sort types shared by every list endpoint
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business rules live in services (see [`crate::application::services`])

pub mod entities;
pub mod listing;
pub mod repositories;
