//! API error responses

use crate::error::CatalogError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error returned by the HTTP layer
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

/// Lookup failures answer `{ "error", "message" }`; failed loads answer in
/// the same shape as a successful load, `{ "success": false, "message" }`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Error { error: String, message: String },
    Load { success: bool, message: String },
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody::Error {
                error: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    pub fn load_failed(cause: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiErrorBody::Load {
                success: false,
                message: format!("Error loading users data: {}", cause),
            },
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(message) => Self::not_found(message),
            CatalogError::Ingestion(e) => Self::load_failed(e.message_chain()),
            CatalogError::Store(e) => Self::internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestionError;
    use serde_json::json;

    #[test]
    fn test_not_found_body() {
        let err = ApiError::from(CatalogError::not_found("User not found with id: 7"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_value(&err.body).unwrap(),
            json!({ "error": "not_found", "message": "User not found with id: 7" })
        );
    }

    #[test]
    fn test_ingestion_failure_body() {
        let err = ApiError::from(CatalogError::from(IngestionError::Exhausted {
            attempts: 3,
            source: Box::new(IngestionError::network("connection reset")),
        }));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&err.body).unwrap(),
            json!({
                "success": false,
                "message": "Error loading users data: Failed to load users from external API \
                            after 3 attempt(s): Network error: connection reset"
            })
        );
    }
}
