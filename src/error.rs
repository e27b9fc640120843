//! Error types for the bookstore server

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Book not found with id: {0}")]
    BookNotFound(i64),

    /// One message per offending field, formatted `{field}: {reason}`
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BookNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_messages(&errors, ""))
    }
}

/// Flatten validator output into sorted `{prefix}{field}: {reason}` lines.
pub fn field_messages(errors: &ValidationErrors, prefix: &str) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}{}: {}", prefix, field, reason)
            })
        })
        .collect();
    messages.sort();
    messages
}

/// Error response body shared by every failure kind
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDto {
    pub timestamp: DateTime<Utc>,
    /// Numeric HTTP status
    pub status: u16,
    /// HTTP status reason phrase
    pub error: String,
    pub message: String,
    /// Request path that produced the error
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<String>>,
}

impl ApiErrorDto {
    pub fn new(status: StatusCode, message: String, validation_errors: Option<Vec<String>>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message,
            path: String::new(),
            validation_errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            other => tracing::debug!("Request failed: {}", other),
        }

        let message = self.to_string();
        let validation_errors = match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        };

        let body = ApiErrorDto::new(status, message, validation_errors);

        // The path is filled in by `attach_request_path`, which can see the URI.
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Middleware completing error envelopes with the path of the failed request
pub async fn attach_request_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ApiErrorDto>() {
        Some(mut body) => {
            body.path = path;
            (response.status(), Json(body)).into_response()
        }
        None => response,
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_id_in_message() {
        let response = AppError::BookNotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "Book not found with id: 7");
        assert!(body.get("validationErrors").is_none());
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_field_list() {
        let error = AppError::Validation(vec!["title: must not be blank".to_string()]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["validationErrors"][0], "title: must not be blank");
    }

    #[tokio::test]
    async fn internal_error_keeps_fault_message() {
        let response = AppError::Internal("storage unavailable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "storage unavailable");
        assert_eq!(body["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn unsupported_media_type_maps_to_415() {
        let error = AppError::UnsupportedMediaType("Expected JSON".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = body_json(response).await;
        assert_eq!(body["status"], 415);
        assert_eq!(body["error"], "Unsupported Media Type");
    }

    #[test]
    fn error_envelope_is_attached_as_extension() {
        let response = AppError::BookNotFound(1).into_response();
        let envelope = response.extensions().get::<ApiErrorDto>().unwrap();
        assert_eq!(envelope.status, 404);
        assert!(envelope.path.is_empty());
    }
}
