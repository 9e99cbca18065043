use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress {
        address: String,
        reason: &'static str,
    },
    #[error("Cannot connect to {endpoint}")]
    ConnectionError {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("Stream error: {0}")]
    StreamError(#[from] tonic::Status),
    #[error("Peer {endpoint} was not ready within {deadline:?}")]
    ReadinessTimeout {
        endpoint: String,
        deadline: Duration,
    },
}

impl Error {
    pub(crate) fn invalid_address(address: &str, reason: &'static str) -> Self {
        Error::InvalidAddress {
            address: address.to_owned(),
            reason,
        }
    }

    pub fn is_invalid_address(&self) -> bool {
        matches!(self, Error::InvalidAddress { .. })
    }
}
