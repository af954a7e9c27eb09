use axum::extract::{Path, Query, State};
use serde::Serialize;
use tracing::info;

use crate::database::{Employee, EmployeePayload};
use crate::error::ApiError;
use crate::filter::{Filter, FilterData};
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

use super::AppState;

const GET_NOT_FOUND: &str = "Employee not found";
const UPDATE_NOT_FOUND: &str = "The employee was not found";
const DELETE_NOT_FOUND: &str = "Employee not found for deletion";

#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Identifiers are integers; anything else names a record that cannot exist.
fn parse_id(raw: &str, not_found: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::not_found(not_found))
}

/// GET /api/employees?active=&search= - List employees matching the optional criteria
///
/// Query pairs are taken as-is so that repeated or unknown keys never reject the request.
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Employee>> {
    let filter = Filter::from(FilterData::from_pairs(pairs));
    let employees = state.employees.select_any(&filter).await?;
    Ok(ApiResponse::success(employees))
}

/// GET /api/employees/:id - Get a single employee
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Employee> {
    let id = parse_id(&id, GET_NOT_FOUND)?;
    let employee = state
        .employees
        .select_404(id)
        .await
        .map_err(|e| ApiError::from_database(e, GET_NOT_FOUND))?;
    Ok(ApiResponse::success(employee))
}

/// POST /api/employees - Create an employee from a partial payload
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<EmployeePayload>,
) -> ApiResult<Employee> {
    let new = payload.into_new_employee()?;
    let employee = state.employees.create(new).await?;
    Ok(ApiResponse::created(employee))
}

/// PUT /api/employees/:id - Overwrite only the fields present in the payload
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<EmployeePayload>,
) -> ApiResult<Employee> {
    let id = parse_id(&id, UPDATE_NOT_FOUND)?;
    let employee = state
        .employees
        .update(id, payload)
        .await
        .map_err(|e| ApiError::from_database(e, UPDATE_NOT_FOUND))?;
    Ok(ApiResponse::success(employee))
}

/// DELETE /api/employees/:id - Permanently remove an employee
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteConfirmation> {
    let id = parse_id(&id, DELETE_NOT_FOUND)?;
    let employee = state
        .employees
        .delete(id)
        .await
        .map_err(|e| ApiError::from_database(e, DELETE_NOT_FOUND))?;

    let message = format!(
        "Employee named {} with id {} deleted.",
        employee.display_name(),
        employee.id
    );
    info!("{}", message);
    Ok(ApiResponse::success(DeleteConfirmation { message }))
}
