//! Mapping of pipeline errors onto HTTP responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::{ErrorSeverity, RelayError};
use relay_types::ErrorResponse;
use tracing::{error, warn, Level};

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be read as JSON
    Rejection(JsonRejection),
    Relay(RelayError),
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self::Relay(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejection(rejection)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejection(_) => StatusCode::BAD_REQUEST,
            Self::Relay(err) if err.is_invalid_argument() => StatusCode::BAD_REQUEST,
            Self::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Rejection(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                rejection.body_text()
            }
            Self::Relay(err) if err.is_invalid_argument() => {
                warn!("Invalid request: {}", err);
                err.to_string()
            }
            // Collaborator details stay in the logs
            Self::Relay(err) => {
                log_failure(&err);
                INTERNAL_SERVER_ERROR.to_string()
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

fn log_failure(err: &RelayError) {
    let logs = match err {
        RelayError::UpstreamFailure { logs, .. } if !logs.is_empty() => logs.join("\n"),
        _ => String::new(),
    };
    let severity: ErrorSeverity = err.severity();
    if severity.log_level() == Level::WARN {
        warn!(?severity, "Request failed: {} {}", err, logs);
    } else {
        error!(?severity, "Request failed: {} {}", err, logs);
    }
}
