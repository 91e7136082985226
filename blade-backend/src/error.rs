//! HTTP-facing error type. Every variant renders as `{"message": ...}`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::db::DbError;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input (400)
    BadRequest(String),
    /// Wrong credentials for a member login (401)
    Unauthorized(String),
    /// Admin gate refused the request (403)
    Forbidden,
    NotFound(String),
    /// Feature needs configuration that is absent (501)
    NotConfigured(String),
    TooManyRequests,
    /// Upstream failure with a message the client may see (500)
    Failed(String),
    /// Anything unexpected. The detail is logged, never returned.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::NotConfigured(msg)
            | ApiError::Failed(msg) => write!(f, "{}", msg),
            ApiError::Forbidden => write!(f, "Forbidden"),
            ApiError::TooManyRequests => write!(f, "Too many requests."),
            ApiError::Internal(detail) => write!(f, "Internal error: {}", detail),
        }
    }
}

impl ApiError {
    /// Message safe to show to the client.
    fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => "Something went wrong. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NotConfigured(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Failed(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            log::error!("Request failed: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.public_message()
        }))
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(format!("I/O error: {}", e))
    }
}
