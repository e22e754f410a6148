// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (token must belong to the target account)
pub mod protected;
pub mod public;

use axum::http::Method;

use crate::error::ApiError;

/// Method-router fallback: unsupported verbs on a known path get the
/// standard error envelope instead of a bare 405.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}

/// Parse the `:id` path segment of `/account/:id`
pub fn parse_account_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::validation(format!("invalid account id: {}", raw)))
}
