use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    pub amount: i64,
}

/// POST /transfer - accepts a transfer request and echoes it back.
/// No balances are touched.
// TODO: add source/target accounts to TransferRequest and move the balance in one store transaction.
pub async fn transfer(
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> ApiResult<TransferRequest> {
    let Json(request) = payload?;
    tracing::info!("Transfer request received for amount {}", request.amount);
    Ok(ApiResponse::ok(request))
}
