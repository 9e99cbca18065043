use crate::config::ClientConfig;
use crate::error::Error;
use crate::readiness::ReadinessWaiter;
use crate::submit::transport::TransactionTransport;
use crate::submit::TransactionSubmitter;
use tracing::{debug, info};

/// Resolves the target, waits for the configured peers and submits one transaction.
pub async fn run<T: TransactionTransport>(
    config: &ClientConfig,
    submitter: &TransactionSubmitter<T>,
) -> Result<(), Error> {
    let target = config.validate()?;
    info!("Node address: {target}");
    info!("Transaction size: {} B", config.transaction_size);

    let waiter = ReadinessWaiter::new(config.readiness);
    let report = waiter.await_all(&config.peers).await?;
    if !report.skipped.is_empty() {
        debug!(
            "Did not wait for {} node(s) with invalid addresses: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }

    submitter
        .submit_one(&config.target, config.transaction_size)
        .await
}
