//! Background jobs.
//!
//! A [`Job`] is a unit of work with a name and a single-shot `run_once`.
//! [`scheduler::run_daily`] drives a job at a fixed time of day until
//! shutdown is signalled.
//!
//! - [`expiry_sweeper::ExpirySweeper`] - Deletes short links past their expiry

pub mod expiry_sweeper;
pub mod scheduler;

pub use expiry_sweeper::{ExpirySweeper, SweepReport};
pub use scheduler::{DailySchedule, run_daily};

use async_trait::async_trait;

use crate::error::AppError;

/// A job that can be run on a schedule.
#[async_trait]
pub trait Job: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Runs one pass to completion.
    async fn run_once(&self) -> Result<(), AppError>;
}
