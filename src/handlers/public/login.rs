use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::database::StoreError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub number: i64,
    pub token: String,
    /// Token lifetime in seconds
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

/// POST /login - trade bank number + password for a token
///
/// Unknown numbers and wrong passwords produce the same error so the
/// endpoint cannot be used to discover which numbers exist.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;

    let account = match state.store.get_account_by_number(request.number).await {
        Ok(account) => account,
        Err(StoreError::NotFound(_)) => {
            tracing::warn!("Login failed: unknown account number");
            return Err(ApiError::Unauthenticated);
        }
        Err(e) => return Err(e.into()),
    };

    if !account.valid_password(&request.password) {
        tracing::warn!("Login failed: bad password");
        return Err(ApiError::Unauthenticated);
    }

    let token = state.tokens.issue(&account)?;
    tracing::info!("Issued token for account {}", account.id);

    Ok(ApiResponse::ok(LoginResponse {
        number: account.number,
        token,
        expires_in: state.tokens.expires_in(),
    }))
}
