use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseManager;

use super::AppState;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Employee Records API",
        "version": version,
        "endpoints": {
            "list": "GET /api/employees?active=&search=",
            "get": "GET /api/employees/:id",
            "create": "POST /api/employees",
            "update": "PUT /api/employees/:id",
            "delete": "DELETE /api/employees/:id",
            "health": "GET /health",
        }
    }))
}

/// GET /health - Liveness plus record store connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(state.employees.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "database unavailable",
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
