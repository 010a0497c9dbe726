//! Fixed time-of-day scheduling.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Days, NaiveTime, Utc};
use tokio::sync::watch;
use tracing::{debug, error, info};

use super::Job;

/// Fires once per day at a fixed UTC time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    pub at: NaiveTime,
}

impl Default for DailySchedule {
    /// Midnight UTC.
    fn default() -> Self {
        Self {
            at: NaiveTime::MIN,
        }
    }
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    /// The first firing strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive().and_time(self.at).and_utc();
        if today > now {
            return today;
        }
        now.date_naive()
            .checked_add_days(Days::new(1))
            .map(|d| d.and_time(self.at).and_utc())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl FromStr for DailySchedule {
    type Err = chrono::ParseError;

    /// Accepts `HH:MM:SS` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Self::new)
    }
}

/// Runs `job` every day at `schedule` until `shutdown` flips to `true` or
/// its sender is dropped.
///
/// A firing always runs to completion before the next one is computed, so
/// firings of the same job never overlap. Failures are logged and the
/// schedule carries on.
pub async fn run_daily(
    job: Arc<dyn Job>,
    schedule: DailySchedule,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(job = job.name(), at = %schedule.at, "Daily job scheduled (UTC)");

    loop {
        let now = Utc::now();
        let next = schedule.next_after(now);
        let wait = (next - now).to_std().unwrap_or_default();
        debug!(job = job.name(), next = %next, "Waiting for next firing");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!(job = job.name(), "Daily job stopped");
                    return;
                }
                continue;
            }
        }

        info!(job = job.name(), "Running daily job");
        if let Err(e) = job.run_once().await {
            error!(job = job.name(), error = %e, "Daily job failed");
        }
    }
}
