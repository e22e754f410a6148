use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::app::AppState;

/// Request header carrying the signed token
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Why a protected request was turned away. Bodies stay generic so callers
/// cannot tell which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// 401: missing/invalid token, bad path id, or bank number mismatch
    AccessDenied,
    /// 403: target account could not be loaded
    InvalidToken,
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Denial::AccessDenied => (StatusCode::UNAUTHORIZED, "Access Denied"),
            Denial::InvalidToken => (StatusCode::FORBIDDEN, "Invalid Token"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Gate for `/account/:id` routes.
///
/// Validates the `x-jwt-token` header, loads the account named by the path
/// id and only forwards when the token's bank number equals the account's.
/// The request is passed on untouched.
pub async fn account_auth_middleware(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    request: Request,
    next: Next,
) -> Response {
    let decision = authorize(&state, request.headers(), path).await;

    match decision {
        Ok(()) => next.run(request).await,
        Err(denial) => denial.into_response(),
    }
}

async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<(), Denial> {
    let token = extract_token(headers).ok_or_else(|| {
        tracing::warn!("Auth denied: missing or unreadable {} header", TOKEN_HEADER);
        Denial::AccessDenied
    })?;

    let claims = state.tokens.validate(token).map_err(|e| {
        tracing::warn!("Auth denied: token rejected");
        tracing::debug!("Token validation error: {}", e);
        Denial::AccessDenied
    })?;

    let id = path
        .ok()
        .and_then(|Path(raw)| raw.parse::<i64>().ok())
        .ok_or_else(|| {
            tracing::warn!("Auth denied: malformed account id in path");
            Denial::AccessDenied
        })?;

    let account = state.store.get_account_by_id(id).await.map_err(|e| {
        tracing::warn!("Auth denied: target account could not be loaded");
        tracing::debug!("Account lookup for id {} failed: {}", id, e);
        Denial::InvalidToken
    })?;

    tracing::debug!(
        claim_number = claims.account_number,
        account_number = account.number,
        "Comparing token claim with account"
    );

    if claims.account_number != account.number {
        tracing::warn!("Auth denied: token does not belong to the requested account");
        return Err(Denial::AccessDenied);
    }

    Ok(())
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
