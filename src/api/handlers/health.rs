//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable
/// - **503 Service Unavailable**: Database unreachable
///
/// The sweeper check is informational and never degrades the status.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let sweeper_check = check_sweeper(&state);

    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            expiry_sweeper: sweeper_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(state.pool.as_ref());

    match tokio::time::timeout(std::time::Duration::from_secs(2), ping).await {
        Ok(Ok(_)) => CheckStatus {
            status: "ok".to_string(),
            message: Some("Connected".to_string()),
        },
        Ok(Err(e)) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {}", e)),
        },
        Err(_) => CheckStatus {
            status: "error".to_string(),
            message: Some("Database ping timed out".to_string()),
        },
    }
}

fn check_sweeper(state: &AppState) -> CheckStatus {
    match state.sweep_schedule {
        Some(schedule) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "Next run at {}",
                schedule.next_after(chrono::Utc::now()).to_rfc3339()
            )),
        },
        None => CheckStatus {
            status: "disabled".to_string(),
            message: None,
        },
    }
}
