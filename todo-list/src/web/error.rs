use crate::entities::sea_orm_active_enums::ParseEnumError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine readable error code
    pub error: String,
    /// Human readable description
    pub message: String,
    /// Field-level messages for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
        }
    }
}

/// Error type for the JSON API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested task, or any task matching a filter, does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Malformed request: bad id, unreadable body, unparsable path or query value.
    #[error("{0}")]
    BadRequest(String),
    /// The body was well formed but some fields are invalid.
    #[error("Validation failed")]
    Validation(BTreeMap<String, Vec<String>>),
    /// The store failed.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|error| match &error.message {
                        Some(message) => message.to_string(),
                        None => error.code.to_string(),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ApiError::Validation(details)
    }
}

impl From<ParseEnumError> for ApiError {
    fn from(error: ParseEnumError) -> Self {
        let mut details = BTreeMap::new();
        details.insert(error.kind().to_string(), vec![error.to_string()]);
        ApiError::Validation(details)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", message),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    details: Some(details),
                    ..ErrorResponse::new(
                        "VALIDATION_FAILED",
                        "One or more fields are invalid".to_string(),
                    )
                },
            ),
            ApiError::Database(err) => {
                tracing::error!("Database operation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "INTERNAL_SERVER_ERROR",
                        "An unexpected error occurred while processing your request. Please try again later.".to_string(),
                    ),
                )
            }
        };
        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn into_parts(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn can_hide_database_errors_behind_internal_server_error() {
        let error = ApiError::Database(sea_orm::DbErr::Custom("connection reset".to_string()));

        let (status, body) = into_parts(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "INTERNAL_SERVER_ERROR");
        assert!(!body.message.contains("connection reset"));
    }

    #[tokio::test]
    async fn can_report_not_found_message() {
        let (status, body) =
            into_parts(ApiError::NotFound("Task with ID 4 not found.".to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Task with ID 4 not found.");
        assert!(body.details.is_none());
    }

    #[tokio::test]
    async fn can_report_field_level_details_for_enum_parse_failures() {
        let parse_error = "Urgent"
            .parse::<crate::entities::sea_orm_active_enums::TaskPriority>()
            .unwrap_err();

        let (status, body) = into_parts(ApiError::from(parse_error)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "VALIDATION_FAILED");
        let details = body.details.unwrap();
        assert_eq!(
            details["priority"],
            vec!["'Urgent' is not a valid priority".to_string()]
        );
    }
}
