use super::transaction::Transaction;
use crate::address::ResolvedEndpoint;
use crate::error::Error;
use async_trait::async_trait;

/// Acknowledgment returned once the send side of a submission stream is closed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement;

/// Creates connections to a node's transaction-submission service.
#[async_trait]
pub trait TransactionTransport: Send + Sync {
    async fn connect(
        &self,
        endpoint: &ResolvedEndpoint,
    ) -> Result<Box<dyn TransactionChannel>, Error>;
}

/// An established connection, closed when dropped.
#[async_trait]
pub trait TransactionChannel: Send {
    async fn open_stream(&mut self) -> Result<Box<dyn TransactionStream>, Error>;
}

/// Client side of a transaction-submission stream.
#[async_trait]
pub trait TransactionStream: Send {
    async fn send(&mut self, transaction: Transaction) -> Result<(), Error>;

    /// Closes the send side and waits for the aggregate acknowledgment.
    async fn close_and_recv(self: Box<Self>) -> Result<Acknowledgement, Error>;
}
