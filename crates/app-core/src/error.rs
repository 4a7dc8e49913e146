//! The application error taxonomy and its single mapping to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use super::github::GithubError;
use super::jwt::JwtError;

const INTERNAL_ERROR_MSG: &str = "An internal server error occurred";
const UPSTREAM_NOT_FOUND_MSG: &str = "No Github profile found";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid request format: {0}")]
    RequestFormat(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A lookup matched nothing. Malformed identifiers end up here as well.
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Upstream directory lookup failed")]
    Upstream(#[from] GithubError),

    #[error("JWT operation failed")]
    Jwt(#[from] JwtError),

    // Third Party Libraries
    #[error("Sea ORM operation failed")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serde JSON operation failed")]
    JsonParse(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

fn internal() -> (StatusCode, String, Option<serde_json::Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MSG.to_string(), None)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation(err) => {
                let details = json!(err.field_errors());
                (StatusCode::BAD_REQUEST, "Validation failed".to_string(), Some(details))
            },
            AppError::RequestFormat(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::NotFound(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Upstream(err) => {
                tracing::warn!("Repository directory error: {:?}", err);
                (StatusCode::NOT_FOUND, UPSTREAM_NOT_FOUND_MSG.to_string(), None)
            },
            AppError::Jwt(err) => (StatusCode::UNAUTHORIZED, err.to_string(), None),

            AppError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                internal()
            },
            AppError::JsonParse(err) => {
                tracing::error!("Failed to parse JSON: {:?}", err);
                internal()
            },
        };

        (status, Json(ErrorResponse { message, details })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use sea_orm::DbErr;
    use serde_json::Value;
    use validator::{ValidationError, ValidationErrors};

    use super::*;

    async fn extract_json_response(response: Response<Body>) -> (StatusCode, Value) {
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json: Value = serde_json::from_slice(&body_bytes).expect("Failed to parse JSON response");
        (status, json)
    }

    fn required(field: &'static str, message: &'static str) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("required");
        error.message = Some(message.into());
        errors.add(field, error);
        errors
    }

    #[tokio::test]
    async fn test_validation_error() {
        let mut errors = required("status", "Status is required");
        let mut skills = ValidationError::new("required");
        skills.message = Some("Skills is required".into());
        errors.add("skills", skills);

        let (status, json) = extract_json_response(AppError::Validation(errors).into_response()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["details"]["status"][0]["message"], "Status is required");
        assert_eq!(json["details"]["skills"][0]["message"], "Skills is required");
    }

    #[tokio::test]
    async fn test_request_format_error() {
        let error = AppError::RequestFormat("Invalid JSON format".to_string());
        let (status, json) = extract_json_response(error.into_response()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid JSON format");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_error() {
        let error = AppError::Unauthorized("Missing or invalid authorization header".to_string());
        let (status, json) = extract_json_response(error.into_response()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Missing or invalid authorization header");
    }

    #[tokio::test]
    async fn test_not_found_error_is_bad_request() {
        let error = AppError::NotFound("There is no profile for this user".to_string());
        let (status, json) = extract_json_response(error.into_response()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "There is no profile for this user");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_upstream_errors_collapse_to_not_found() {
        let errors = vec![
            GithubError::InvalidUsername("bad/name".to_string()),
            GithubError::Status(reqwest::StatusCode::FORBIDDEN),
            GithubError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for err in errors {
            let (status, json) = extract_json_response(AppError::Upstream(err).into_response()).await;

            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json["message"], "No Github profile found");
        }
    }

    #[tokio::test]
    async fn test_jwt_errors_are_unauthorized() {
        let (status, json) = extract_json_response(AppError::Jwt(JwtError::TokenExpired).into_response()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Token has expired");

        let (status, json) = extract_json_response(AppError::Jwt(JwtError::InvalidToken).into_response()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid token format or signature");
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let error = AppError::Database(DbErr::Custom("relation \"profiles\" does not exist".to_string()));
        let (status, json) = extract_json_response(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "An internal server error occurred");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn test_json_parse_error() {
        let json_error = serde_json::from_str::<Value>("invalid json").unwrap_err();
        let (status, json) = extract_json_response(AppError::JsonParse(json_error).into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "An internal server error occurred");
    }
}
