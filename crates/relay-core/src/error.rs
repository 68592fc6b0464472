//! Error taxonomy for the relay pipeline
//!
//! Every failure is classified as one of three kinds so the HTTP boundary can
//! map it to a status code without inspecting messages:
//! - `InvalidArgument`: caller input is malformed, never retried
//! - `UpstreamFailure`: the market service or RPC rejected the request
//! - `TransientFailure`: the network could not be reached
//!
//! `Internal` covers local encoding failures that are neither the caller's
//! nor a collaborator's fault.

use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Malformed or semantically invalid caller input
    #[error("{message}")]
    InvalidArgument { field: String, message: String },

    /// A collaborator rejected the request for a domain reason
    #[error("Upstream failure ({origin}): {message}")]
    UpstreamFailure {
        origin: String,
        message: String,
        /// Diagnostic lines returned by the collaborator, e.g. simulation logs
        logs: Vec<String>,
    },

    /// The collaborator could not be reached
    #[error("Transient failure ({origin}): {message}")]
    TransientFailure { origin: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RelayError {
    pub fn invalid_argument<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn upstream<O: Into<String>, M: Into<String>>(origin: O, message: M) -> Self {
        Self::UpstreamFailure {
            origin: origin.into(),
            message: message.into(),
            logs: Vec::new(),
        }
    }

    pub fn upstream_with_logs<O: Into<String>, M: Into<String>>(
        origin: O,
        message: M,
        logs: Vec<String>,
    ) -> Self {
        Self::UpstreamFailure {
            origin: origin.into(),
            message: message.into(),
            logs,
        }
    }

    pub fn transient<O: Into<String>, M: Into<String>>(origin: O, message: M) -> Self {
        Self::TransientFailure {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify an RPC client error. Transport-level failures are transient,
    /// anything the node answered is an upstream rejection.
    pub fn from_rpc(origin: &str, error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) => Self::transient(origin, error.to_string()),
            ClientErrorKind::Reqwest(e) if e.is_connect() || e.is_timeout() => {
                Self::transient(origin, error.to_string())
            }
            ClientErrorKind::RpcError(RpcError::RpcResponseError {
                data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
                ..
            }) => Self::upstream_with_logs(
                origin,
                error.to_string(),
                result.logs.clone().unwrap_or_default(),
            ),
            _ => Self::upstream(origin, error.to_string()),
        }
    }

    /// Classify an HTTP client error from the market service
    pub fn from_http(origin: &str, error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return Self::upstream(origin, format!("HTTP {status}: {error}"));
        }
        Self::upstream(origin, error.to_string())
    }

    /// Whether the failure is worth retrying at all
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientFailure { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgument { .. } => ErrorSeverity::Warning,
            Self::TransientFailure { .. } => ErrorSeverity::Warning,
            Self::UpstreamFailure { .. } => ErrorSeverity::Error,
            Self::Internal { .. } => ErrorSeverity::Critical,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl ErrorSeverity {
    /// Get the log level for this severity
    pub fn log_level(&self) -> tracing::Level {
        match self {
            Self::Warning => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
            Self::Critical => tracing::Level::ERROR,
        }
    }
}
