use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::database::Account;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl CreateAccountRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(ApiError::validation("firstName and lastName are required"));
        }
        if self.password.is_empty() {
            return Err(ApiError::validation("password is required"));
        }
        Ok(())
    }
}

/// GET /account - every account, in no particular order
pub async fn account_list(State(state): State<AppState>) -> ApiResult<Vec<Account>> {
    let accounts = state.store.get_accounts().await?;
    Ok(ApiResponse::ok(accounts))
}

/// POST /account - create an account and return the stored record
///
/// ```json
/// { "firstName": "John", "lastName": "Doe", "password": "secret" }
/// ```
///
/// The response carries the generated `id` and `number`; the password hash
/// is never serialized.
pub async fn account_create(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> ApiResult<Account> {
    let Json(request) = payload?;
    request.validate()?;

    let account = Account::new(request.first_name, request.last_name, &request.password)?;
    let created = state.store.create_account(&account).await?;

    tracing::info!("Created account {}", created.id);
    Ok(ApiResponse::ok(created))
}
