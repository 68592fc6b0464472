//! `POST /submit`

use crate::error::ApiError;
use crate::types::ApiState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use relay_types::{SubmitRequest, SubmitResponse, SUCCESS_MESSAGE};
use tracing::{info, instrument};
use uuid::Uuid;

/// Forward a client-signed transaction to the network
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn submit_transaction(
    State(state): State<ApiState>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(request) = body?;
    // Only the length is logged; the signed bytes never reach the logs
    info!(
        "Submit request: transaction length={} rpc_url={:?} commitment={:?}",
        request
            .transaction_base64_signed
            .as_deref()
            .map_or(0, str::len),
        request.rpc_url,
        request.commitment
    );

    let result = state
        .submitter
        .submit_request(&request, &state.config)
        .await?;

    Ok(Json(SubmitResponse {
        message: SUCCESS_MESSAGE.to_string(),
        signature: result.signature.to_string(),
        timestamp: result.timestamp,
    }))
}
