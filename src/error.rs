// HTTP API error types
use axum::{
    extract::rejection::JsonRejection,
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::password::PasswordError;
use crate::auth::JwtError;
use crate::database::StoreError;

/// Errors surfaced by the HTTP handlers.
///
/// Every variant renders the same way: `400 Bad Request` with `{"error": message}`.
/// The auth middleware has its own denial responses and does not go through here.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed JSON request body
    Decode(String),
    /// Bad path parameter or request field
    Validation(String),
    NotFound(String),
    Conflict(String),
    Signing(String),
    InvalidToken(String),
    /// Persistence failure; message is already client-safe
    Store(String),
    MethodNotAllowed(Method),
    /// Login with unknown number or wrong password
    Unauthenticated,
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::Decode(msg) => format!("invalid request body: {}", msg),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::Conflict(msg) => msg.clone(),
            ApiError::Signing(msg) => msg.clone(),
            ApiError::InvalidToken(msg) => msg.clone(),
            ApiError::Store(msg) => msg.clone(),
            ApiError::MethodNotAllowed(method) => format!("method not allowed: {}", method),
            ApiError::Unauthenticated => "not authenticated".to_string(),
            ApiError::Internal(msg) => msg.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            StoreError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::Store("database error occurred".to_string())
            }
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::MissingSecret | JwtError::Signing(_) => {
                tracing::error!("Token issuance failed: {}", err);
                ApiError::Signing("failed to issue token".to_string())
            }
            JwtError::InvalidToken(msg) => ApiError::InvalidToken(msg),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password hashing failed: {}", err);
        ApiError::Internal("failed to process password".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Decode(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
