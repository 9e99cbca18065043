pub mod defaults;

use crate::address::{self, ResolvedEndpoint};
use crate::error::Error;
use crate::readiness::ReadinessPolicy;
use defaults::{DEFAULT_TRANSACTION_SIZE, MIN_TRANSACTION_SIZE};

/// Immutable run configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint of the node receiving the transaction.
    pub target: String,
    /// Size of the transaction in bytes.
    pub transaction_size: usize,
    /// Endpoints that must accept connections before the transaction is sent.
    pub peers: Vec<String>,
    /// How peers are polled while waiting for them.
    pub readiness: ReadinessPolicy,
}

impl ClientConfig {
    pub fn new(target: &str) -> Self {
        ClientConfig {
            target: target.to_owned(),
            transaction_size: DEFAULT_TRANSACTION_SIZE,
            peers: Vec::new(),
            readiness: ReadinessPolicy::default(),
        }
    }

    pub fn with_transaction_size(mut self, transaction_size: usize) -> Self {
        self.transaction_size = transaction_size;
        self
    }

    pub fn with_peers(mut self, peers: Vec<String>) -> Self {
        self.peers = peers;
        self
    }

    pub fn with_readiness(mut self, readiness: ReadinessPolicy) -> Self {
        self.readiness = readiness;
        self
    }

    /// Checks the settings that must hold before any network activity and
    /// returns the resolved target.
    pub fn validate(&self) -> Result<ResolvedEndpoint, Error> {
        if self.target.is_empty() {
            return Err(Error::InvalidConfiguration(
                "target address is required".to_owned(),
            ));
        }

        validate_transaction_size(self.transaction_size)?;
        address::resolve(&self.target)
    }
}

pub(crate) fn validate_transaction_size(size: usize) -> Result<(), Error> {
    if size < MIN_TRANSACTION_SIZE {
        return Err(Error::InvalidConfiguration(format!(
            "transaction size must be at least {MIN_TRANSACTION_SIZE} bytes, got {size}"
        )));
    }
    Ok(())
}
