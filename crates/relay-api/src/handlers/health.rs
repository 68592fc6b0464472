use crate::types::HEALTH_MESSAGE;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}
