use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::Account;
use crate::handlers::parse_account_id;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /account/:id - show a single account
pub async fn account_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Account> {
    let id = parse_account_id(&id)?;
    let account = state.store.get_account_by_id(id).await?;
    Ok(ApiResponse::ok(account))
}

/// DELETE /account/:id - remove the account, answering `{"deleted": id}`
pub async fn account_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_account_id(&id)?;
    state.store.delete_account(id).await?;

    tracing::info!("Deleted account {}", id);
    Ok(ApiResponse::ok(json!({ "deleted": id })))
}
