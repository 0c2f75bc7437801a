use crate::database::DatabaseError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub enum AppError {
    Config(config::ConfigError),
    Database(DatabaseError),
    Validation(FieldErrors),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "Configuration error: {}", err),
            AppError::Database(err) => write!(f, "Database error: {}", err),
            AppError::Validation(errors) => {
                write!(f, "Validation failed for {} field(s)", errors.len())
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Validation failures echo the offending fields back to the caller
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!(errors))).into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            // Internal messages are generic phrases set by the handler, safe to return
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": msg }))).into_response()
            }
            // Database and config details stay in the logs
            AppError::Config(_) | AppError::Database(_) => {
                tracing::error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn field_errors(field: &str, message: &str) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        errors
    }

    #[test]
    fn test_app_error_display() {
        let db_err = AppError::Database(DatabaseError::NotFound);
        assert!(db_err.to_string().contains("Database error"));

        let validation_err = AppError::Validation(field_errors("quantity", "required"));
        assert_eq!(validation_err.to_string(), "Validation failed for 1 field(s)");

        let not_found_err = AppError::NotFound("no sales".to_string());
        assert_eq!(not_found_err.to_string(), "Not found: no sales");

        let internal_err = AppError::Internal("test message".to_string());
        assert_eq!(internal_err.to_string(), "Internal error: test message");
    }

    #[test]
    fn test_app_error_from_database_error() {
        let db_err = DatabaseError::Database("connection refused".to_string());
        let app_err: AppError = db_err.into();
        assert!(matches!(app_err, AppError::Database(_)));
    }

    #[test]
    fn test_app_error_into_response() {
        let validation_err = AppError::Validation(field_errors("product", "required"));
        let response = validation_err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let not_found_err = AppError::NotFound("no sales".to_string());
        let response = not_found_err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let internal_err = AppError::Internal("test".to_string());
        let response = internal_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let db_err = AppError::Database(DatabaseError::NotFound);
        let response = db_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_validation_response_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert(
            "product".to_string(),
            vec!["This field is required.".to_string()],
        );
        errors.insert(
            "quantity".to_string(),
            vec!["This field is required.".to_string()],
        );

        let response = AppError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body.get("product").is_some());
        assert!(body.get("quantity").is_some());
    }

    #[tokio::test]
    async fn test_database_response_is_opaque() {
        let response =
            AppError::Database(DatabaseError::Database("secret detail".to_string())).into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
        assert!(!bytes.windows(6).any(|w| w == b"secret"));
    }
}
