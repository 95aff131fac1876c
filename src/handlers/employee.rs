use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::AppState;
use crate::employee::{CreateEmployeeInput, DeleteEmployeeInput, Employee, EmployeeId};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Path ids that don't parse can't name a record, so they read as absent
fn parse_id(raw: &str) -> Option<EmployeeId> {
    match raw.parse::<EmployeeId>() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::debug!("unparseable employee id {:?}", raw);
            None
        }
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))
}

/// GET /api/v1/employee - every record in insertion order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    let employees = state.source.list_all().await?;
    Ok(ApiResponse::success(employees))
}

/// GET /api/v1/employee/:id
pub async fn get_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Employee> {
    let Some(id) = parse_id(&id) else {
        return Ok(ApiResponse::not_found());
    };

    match state.source.get_by_id(&id).await? {
        Some(employee) => Ok(ApiResponse::success(employee)),
        None => {
            tracing::debug!("employee {} not found", id);
            Ok(ApiResponse::not_found())
        }
    }
}

/// GET /api/v1/employee/search/:text - case-sensitive name substring
pub async fn search(State(state): State<AppState>, Path(text): Path<String>) -> ApiResult<Vec<Employee>> {
    match state.source.find_by_name(&text).await? {
        Some(employees) => Ok(ApiResponse::success(employees)),
        None => Ok(ApiResponse::not_found()),
    }
}

/// GET /api/v1/employee/highestSalary - bare integer, empty 404 when no records
pub async fn highest_salary(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(match state.source.highest_salary().await? {
        Some(salary) => Json(salary).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// GET /api/v1/employee/topTenHighestEarningEmployeeNames - bare list of names
pub async fn top_ten(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.source.top_ten_names().await?))
}

/// POST /api/v1/employee
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<CreateEmployeeInput>, JsonRejection>,
) -> ApiResult<Employee> {
    let input = json_body(payload)?;
    let employee = state.source.create(&input).await?;
    tracing::debug!("create of {} requested by {}", employee.id, caller.name());
    Ok(ApiResponse::success(employee))
}

/// DELETE /api/v1/employee - body names the record by id or name
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: Result<Json<DeleteEmployeeInput>, JsonRejection>,
) -> ApiResult<bool> {
    let input = json_body(payload)?;
    let removed = state.source.delete(&input).await?;
    tracing::debug!("delete by body requested by {} (removed: {})", caller.name(), removed);
    Ok(ApiResponse::success(removed))
}

/// DELETE /api/v1/employee/:id - removed record's name as plain text
pub async fn delete_by_id(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let Some(id) = parse_id(&id) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    Ok(match state.source.delete_by_id(&id).await? {
        Some(name) => {
            tracing::debug!("delete of {} requested by {}", id, caller.name());
            name.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    })
}
