pub mod grpc;
pub mod transaction;
pub mod transport;

use crate::address;
use crate::config::validate_transaction_size;
use crate::error::Error;
use grpc::GrpcTransport;
use tracing::info;
use transaction::Transaction;
use transport::TransactionTransport;

/// Counter of the one transaction sent per run.
pub const SINGLE_SHOT_COUNTER: u64 = 0;

/// Sends exactly one benchmark transaction and waits for its acknowledgment.
/// Every failure is terminal, nothing is retried.
#[derive(Debug, Default, Clone)]
pub struct TransactionSubmitter<T: TransactionTransport = GrpcTransport> {
    transport: T,
}

impl TransactionSubmitter<GrpcTransport> {
    pub fn grpc() -> Self {
        TransactionSubmitter::new(GrpcTransport)
    }
}

impl<T: TransactionTransport> TransactionSubmitter<T> {
    pub fn new(transport: T) -> Self {
        TransactionSubmitter { transport }
    }

    pub async fn submit_one(&self, target: &str, size: usize) -> Result<(), Error> {
        validate_transaction_size(size)?;
        let endpoint = address::resolve(target)?;

        let mut channel = self.transport.connect(&endpoint).await?;
        let mut stream = channel.open_stream().await?;

        let transaction = Transaction::benchmark(size, SINGLE_SHOT_COUNTER)?;
        info!("Sending sample transaction {SINGLE_SHOT_COUNTER} of {size} B to {endpoint}...");
        stream.send(transaction).await?;
        stream.close_and_recv().await?;

        info!("Transaction of {size} B was acknowledged by {endpoint}.");
        Ok(())
    }
}
