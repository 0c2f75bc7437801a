use crate::{error::AppError, server::Server};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct HealthCheckQuery {
    #[serde(default)]
    check: Option<String>,
}

/// Create health check routes
///
/// The health service aggregates checks from all registered components
/// (currently the database connection). Without a `check` query the
/// endpoint answers basic liveness only.
pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/", get(health_check))
}

async fn health_check(
    State(server): State<Server>,
    Query(params): Query<HealthCheckQuery>,
) -> Result<Json<Value>, AppError> {
    let filter = params.check.as_deref();
    let health_response = server.health_service.check_health(filter).await;

    let response_json = serde_json::to_value(&health_response)
        .map_err(|e| AppError::Internal(format!("Failed to serialize health response: {}", e)))?;

    Ok(Json(response_json))
}
