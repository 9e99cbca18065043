use super::transaction::Transaction;
use super::transport::{
    Acknowledgement, TransactionChannel, TransactionStream, TransactionTransport,
};
use crate::address::ResolvedEndpoint;
use crate::error::Error;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use tracing::{debug, trace};

pub const SUBMIT_TRANSACTION_STREAM_PATH: &str = "/narwhal.Transactions/SubmitTransactionStream";

/// `message Transaction { bytes transaction = 1; }`
#[derive(Clone, PartialEq, prost::Message)]
pub struct TransactionProto {
    #[prost(bytes = "bytes", tag = "1")]
    pub transaction: Bytes,
}

/// `message Empty {}`
#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Empty {}

impl From<Transaction> for TransactionProto {
    fn from(transaction: Transaction) -> Self {
        TransactionProto {
            transaction: transaction.into_bytes(),
        }
    }
}

/// Plaintext HTTP/2 gRPC transport.
#[derive(Debug, Default, Copy, Clone)]
pub struct GrpcTransport;

#[async_trait]
impl TransactionTransport for GrpcTransport {
    async fn connect(
        &self,
        endpoint: &ResolvedEndpoint,
    ) -> Result<Box<dyn TransactionChannel>, Error> {
        debug!("Connecting to {endpoint}...");
        let channel = Endpoint::from_shared(format!("http://{endpoint}"))
            .map_err(|source| connection_error(endpoint, source))?
            .connect()
            .await
            .map_err(|source| connection_error(endpoint, source))?;
        debug!("Connected to {endpoint}.");
        Ok(Box::new(GrpcChannel {
            grpc: Grpc::new(channel),
        }))
    }
}

fn connection_error(endpoint: &ResolvedEndpoint, source: tonic::transport::Error) -> Error {
    Error::ConnectionError {
        endpoint: endpoint.to_string(),
        source,
    }
}

struct GrpcChannel {
    grpc: Grpc<Channel>,
}

#[async_trait]
impl TransactionChannel for GrpcChannel {
    async fn open_stream(&mut self) -> Result<Box<dyn TransactionStream>, Error> {
        // The readiness slot reserved here is consumed by the streaming call,
        // so this clone must be the one that performs it.
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|error| Status::unavailable(format!("Service was not ready: {error}")))?;
        Ok(Box::new(GrpcStream {
            grpc,
            pending: Vec::new(),
        }))
    }
}

struct GrpcStream {
    grpc: Grpc<Channel>,
    pending: Vec<TransactionProto>,
}

#[async_trait]
impl TransactionStream for GrpcStream {
    /// Queues the transaction; queued messages go out on the wire once the
    /// stream is closed with [`TransactionStream::close_and_recv`].
    async fn send(&mut self, transaction: Transaction) -> Result<(), Error> {
        trace!("Queueing transaction of {} B", transaction.len());
        self.pending.push(transaction.into());
        Ok(())
    }

    async fn close_and_recv(self: Box<Self>) -> Result<Acknowledgement, Error> {
        let GrpcStream { mut grpc, pending } = *self;
        let path = PathAndQuery::from_static(SUBMIT_TRANSACTION_STREAM_PATH);
        let codec = ProstCodec::<TransactionProto, Empty>::default();
        grpc.client_streaming(Request::new(stream::iter(pending)), path, codec)
            .await?;
        Ok(Acknowledgement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn transaction_proto_should_carry_payload_in_field_one() {
        let transaction = Transaction::benchmark(9, 0).unwrap();
        let encoded = TransactionProto::from(transaction).encode_to_vec();
        // field 1, wire type 2 (length-delimited), length 9
        assert_eq!(&encoded[..2], &[0x0a_u8, 0x09]);
        assert_eq!(&encoded[2..], &[0u8; 9]);
    }

    #[test]
    fn empty_should_decode_from_no_bytes() {
        let empty = Empty::decode(&[0u8; 0][..]).unwrap();
        assert_eq!(empty, Empty {});
    }

    #[tokio::test]
    async fn should_fail_with_connection_error_for_closed_port() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = ResolvedEndpoint::new(&address.to_string()).unwrap();
        let result = GrpcTransport.connect(&endpoint).await;
        assert!(matches!(result, Err(Error::ConnectionError { .. })));
    }
}
