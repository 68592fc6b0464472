//! `POST /prepare`

use crate::error::ApiError;
use crate::types::ApiState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use relay_types::{PrepareRequest, PrepareResponse, SUCCESS_MESSAGE};
use tracing::{info, instrument};
use uuid::Uuid;

/// Build an unsigned trade transaction for the caller to sign
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn prepare_transaction(
    State(state): State<ApiState>,
    body: Result<Json<PrepareRequest>, JsonRejection>,
) -> Result<Json<PrepareResponse>, ApiError> {
    let Json(request) = body?;
    info!(
        "Prepare request: direction={:?} signer={:?} mint={:?} amount={:?}",
        request.trade_direction,
        request.signer_address,
        request.mint_address,
        request.amount_lamports
    );

    let transaction_base64 = state
        .preparer
        .prepare_base64(&request, &state.config)
        .await?;

    info!(
        "Prepared transaction ({} base64 chars)",
        transaction_base64.len()
    );
    Ok(Json(PrepareResponse {
        message: SUCCESS_MESSAGE.to_string(),
        transaction_base64,
        timestamp: relay_core::timestamp(),
    }))
}
