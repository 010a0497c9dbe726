//! Per-operation time budget.

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Default budget for a single service operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs `fut` and fails with [`AppError::Timeout`] if it does not finish
/// within `limit`. The inner future is dropped on expiry.
pub async fn with_deadline<T, F>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::timeout(
            "Operation timed out",
            json!({
                "operation": operation,
                "timeout_ms": u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
            }),
        )),
    }
}
