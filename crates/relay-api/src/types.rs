use relay_core::{RelayConfig, TradePreparer, TransactionSubmitter};
use std::sync::Arc;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    pub preparer: Arc<TradePreparer>,
    pub submitter: Arc<TransactionSubmitter>,
    pub config: Arc<RelayConfig>,
}

impl ApiState {
    pub fn new(
        preparer: TradePreparer,
        submitter: TransactionSubmitter,
        config: RelayConfig,
    ) -> Self {
        Self {
            preparer: Arc::new(preparer),
            submitter: Arc::new(submitter),
            config: Arc::new(config),
        }
    }
}

/// Body of the health routes
pub const HEALTH_MESSAGE: &str = "Server is running!";
