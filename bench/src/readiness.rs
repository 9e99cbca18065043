use crate::address::{self, ResolvedEndpoint};
use crate::config::defaults::{ATTEMPT_TIMEOUT, RETRY_INTERVAL};
use crate::error::Error;
use futures::future::join_all;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, timeout_at, Instant};
use tracing::{debug, info, trace, warn};

/// Order in which peers are polled.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum WaitMode {
    /// Peer `i + 1` is polled only once peer `i` accepted a connection.
    #[default]
    Sequential,
    /// All peers are polled at once on the calling task.
    Concurrent,
}

/// Polling parameters for the readiness wait.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Upper bound of a single connection attempt.
    pub attempt_timeout: Duration,
    /// Pause between two failed attempts against the same peer.
    pub retry_interval: Duration,
    /// Overall bound of the wait, `None` waits forever.
    pub deadline: Option<Duration>,
    pub mode: WaitMode,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        ReadinessPolicy {
            attempt_timeout: ATTEMPT_TIMEOUT,
            retry_interval: RETRY_INTERVAL,
            deadline: None,
            mode: WaitMode::Sequential,
        }
    }
}

impl ReadinessPolicy {
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_mode(mut self, mode: WaitMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Outcome of a readiness wait.
#[derive(Debug, Default, Clone)]
pub struct ReadinessReport {
    /// Peers that accepted a connection, in input order.
    pub ready: Vec<ResolvedEndpoint>,
    /// Peer addresses that could not be resolved and were not waited on.
    pub skipped: Vec<String>,
    /// Total number of connection attempts.
    pub attempts: u64,
}

#[derive(Debug, Copy, Clone)]
struct Deadline {
    at: Instant,
    after: Duration,
}

/// Blocks until every peer in a list accepts a raw TCP connection.
#[derive(Debug, Default, Clone)]
pub struct ReadinessWaiter {
    policy: ReadinessPolicy,
}

impl ReadinessWaiter {
    pub fn new(policy: ReadinessPolicy) -> Self {
        ReadinessWaiter { policy }
    }

    pub fn policy(&self) -> &ReadinessPolicy {
        &self.policy
    }

    /// Waits for every peer address. Addresses that cannot be resolved are logged and
    /// skipped; only an elapsed deadline makes the wait fail.
    pub async fn await_all<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Result<ReadinessReport, Error> {
        if addresses.is_empty() {
            return Ok(ReadinessReport::default());
        }

        let (peers, rejected) = address::resolve_all(addresses);
        let skipped = rejected
            .into_iter()
            .map(|(input, error)| {
                warn!("Skipping peer {input}, cannot parse its address: {error}");
                input
            })
            .collect::<Vec<_>>();

        if peers.is_empty() {
            return Ok(ReadinessReport {
                skipped,
                ..Default::default()
            });
        }

        info!("Waiting for {} node(s) to come online...", peers.len());
        let deadline = self.deadline();
        let attempts = match self.policy.mode {
            WaitMode::Sequential => {
                let mut attempts = 0;
                for peer in &peers {
                    attempts += self.poll_until(peer, deadline).await?;
                }
                attempts
            }
            WaitMode::Concurrent => {
                let results =
                    join_all(peers.iter().map(|peer| self.poll_until(peer, deadline))).await;
                let mut attempts = 0;
                for result in results {
                    attempts += result?;
                }
                attempts
            }
        };

        info!("All {} node(s) are online.", peers.len());
        Ok(ReadinessReport {
            ready: peers,
            skipped,
            attempts,
        })
    }

    /// Waits for a single endpoint and returns the number of attempts it took.
    pub async fn await_peer(&self, endpoint: &ResolvedEndpoint) -> Result<u64, Error> {
        self.poll_until(endpoint, self.deadline()).await
    }

    fn deadline(&self) -> Option<Deadline> {
        self.policy.deadline.map(|after| Deadline {
            at: Instant::now() + after,
            after,
        })
    }

    async fn poll_until(
        &self,
        endpoint: &ResolvedEndpoint,
        deadline: Option<Deadline>,
    ) -> Result<u64, Error> {
        let Some(deadline) = deadline else {
            return Ok(self.poll(endpoint).await);
        };

        timeout_at(deadline.at, self.poll(endpoint))
            .await
            .map_err(|_| Error::ReadinessTimeout {
                endpoint: endpoint.to_string(),
                deadline: deadline.after,
            })
    }

    async fn poll(&self, endpoint: &ResolvedEndpoint) -> u64 {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match timeout(
                self.policy.attempt_timeout,
                TcpStream::connect(endpoint.as_str()),
            )
            .await
            {
                Ok(Ok(stream)) => {
                    drop(stream);
                    debug!("Node {endpoint} is online after {attempts} attempt(s).");
                    return attempts;
                }
                Ok(Err(error)) => trace!("Node {endpoint} is not reachable yet: {error}"),
                Err(_) => trace!(
                    "Connection attempt to {endpoint} timed out after {:?}",
                    self.policy.attempt_timeout
                ),
            }
            sleep(self.policy.retry_interval).await;
        }
    }
}
