mod args;
mod logging;

use crate::args::Args;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tx_bench::runner;
use tx_bench::submit::TransactionSubmitter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(!args.no_ansi);

    let config = args.client_config();
    runner::run(&config, &TransactionSubmitter::grpc())
        .await
        .with_context(|| format!("Cannot send transaction to {}", config.target))?;

    info!("Successfully sent 1 transaction.");
    Ok(())
}
