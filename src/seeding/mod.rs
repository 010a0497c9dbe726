//! Test data seeding.
//!
//! Seeders run in foreign-key order: users, then short links, then visits.
//! In manual mode each seeder inserts a fixed set of fixtures with stable
//! ids; in factory mode it generates records whose parent ids are drawn
//! from what is already stored.
//!
//! There is no rollback. A failure stops the run and leaves everything
//! inserted so far in place.

pub mod factory;
pub mod short_link_seeder;
pub mod user_seeder;
pub mod visit_seeder;

pub use short_link_seeder::ShortLinkSeeder;
pub use user_seeder::UserSeeder;
pub use visit_seeder::VisitSeeder;

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::AppError;

/// Where seeded records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Fixed fixtures.
    #[default]
    Manual,
    /// Randomly generated records.
    Factory,
}

impl std::fmt::Display for SeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedMode::Manual => f.write_str("manual"),
            SeedMode::Factory => f.write_str("factory"),
        }
    }
}

/// Mode plus per-entity record counts. Counts only apply to factory mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeederConfig {
    pub mode: SeedMode,
    pub user_count: usize,
    pub short_link_count: usize,
    pub visit_count: usize,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            mode: SeedMode::Manual,
            user_count: 10,
            short_link_count: 10,
            visit_count: 10,
        }
    }
}

/// One entity's seeding pass.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Seeder: Send + Sync {
    /// Entity name used in logs and the summary.
    fn name(&self) -> &'static str;

    /// Inserts this seeder's records and returns how many were inserted.
    ///
    /// # Errors
    ///
    /// Stops at the first failed insert.
    async fn seed(&self) -> Result<usize, AppError>;
}

/// Runs seeders in order and stops at the first failure.
pub struct DatabaseSeeder {
    mode: SeedMode,
    seeders: Vec<Box<dyn Seeder>>,
}

impl DatabaseSeeder {
    pub fn new(mode: SeedMode, seeders: Vec<Box<dyn Seeder>>) -> Self {
        Self { mode, seeders }
    }

    /// Runs every seeder. Returns `(name, inserted)` per seeder on success.
    pub async fn seed_all(&self) -> Result<Vec<(&'static str, usize)>, AppError> {
        info!(mode = %self.mode, seeders = self.seeders.len(), "Starting database seeding");

        let mut summary = Vec::with_capacity(self.seeders.len());
        for seeder in &self.seeders {
            info!(seeder = seeder.name(), "Seeding");
            match seeder.seed().await {
                Ok(inserted) => {
                    info!(seeder = seeder.name(), inserted, "Seeder finished");
                    summary.push((seeder.name(), inserted));
                }
                Err(e) => {
                    error!(seeder = seeder.name(), error = %e, "Seeding failed");
                    return Err(e);
                }
            }
        }

        info!("All database seeding completed");
        Ok(summary)
    }
}
