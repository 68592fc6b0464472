use anyhow::{Context, Result};
use clap::Parser;
use relay_api::{create_router, logging, ApiState};
use relay_core::{
    config, HttpMarketAdapter, RelayConfig, SolanaRpcGateway, TradePreparer, TransactionSubmitter,
};
use std::sync::Arc;
use tracing::info;

/// HTTP relay that prepares unsigned bonding-curve trades and submits signed ones.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// File that receives a copy of every log line
    #[arg(long, env = "LOG_FILE")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_file = cli.log_file.unwrap_or_else(config::logging::log_file);
    logging::init_tracing(&config::logging::rust_log_filter(), &log_file)?;

    let relay_config = RelayConfig::from_env();
    info!(
        "Default RPC {} ({:?}), market service {} ({}), fee {} bps to {}",
        relay_config.default_rpc_url,
        relay_config.default_commitment.commitment,
        relay_config.market_api_url,
        relay_config.market_environment,
        relay_config.fee_schedule.bps,
        relay_config.fee_schedule.wallet
    );

    let rpc = Arc::new(SolanaRpcGateway::new(
        relay_config.rpc_timeout,
        relay_config.send_max_retries,
    ));
    let market = Arc::new(HttpMarketAdapter::new(
        relay_config.market_api_url.clone(),
        relay_config.market_timeout,
    ));

    let preparer = TradePreparer::new(
        market,
        rpc.clone(),
        relay_config.fee_schedule,
        relay_config.market_environment,
    );
    let submitter = TransactionSubmitter::new(rpc);
    let app = create_router(ApiState::new(preparer, submitter, relay_config));

    let host = cli.host.unwrap_or_else(config::server::host);
    let port = cli.port.unwrap_or_else(config::server::port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server is running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
