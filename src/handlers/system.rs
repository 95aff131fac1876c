use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use super::{AppState, EMPLOYEE_PREFIX};
use crate::error::ApiError;

/// GET / - service banner
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Employee Directory",
        "version": version,
        "tier": state.tier,
        "source": state.source.kind(),
        "endpoints": {
            "home": "/ (public)",
            "health": "/health, /actuator/health (public)",
            "employees": format!("{}[/:id] (basic auth)", EMPLOYEE_PREFIX),
            "search": format!("{}/search/:text (basic auth)", EMPLOYEE_PREFIX),
            "highest_salary": format!("{}/highestSalary (basic auth)", EMPLOYEE_PREFIX),
            "top_earners": format!("{}/topTenHighestEarningEmployeeNames (basic auth)", EMPLOYEE_PREFIX),
        }
    }))
}

/// GET /health and /actuator/health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let mut body = json!({
        "status": "UP",
        "tier": state.tier,
        "timestamp": chrono::Utc::now(),
    });
    if let Some(count) = state.source.record_count() {
        body["records"] = json!(count);
    }
    Json(body)
}

pub async fn fallback() -> ApiError {
    ApiError::not_found("No such route")
}
