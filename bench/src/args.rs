use clap::Parser;
use std::time::Duration;
use tx_bench::config::defaults::*;
use tx_bench::config::ClientConfig;
use tx_bench::readiness::{ReadinessPolicy, WaitMode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Network address of the node receiving the transaction, e.g. http://127.0.0.1:7000
    #[arg(long)]
    pub addr: String,

    /// Size of the transaction in bytes
    #[arg(long, default_value_t = DEFAULT_TRANSACTION_SIZE)]
    pub size: usize,

    /// Comma separated network addresses that must be reachable before starting
    #[arg(long, value_delimiter = ',')]
    pub nodes: Vec<String>,

    /// Timeout of a single connection attempt while waiting for nodes
    #[arg(long, default_value = DEFAULT_ATTEMPT_TIMEOUT, value_parser = humantime::parse_duration)]
    pub attempt_timeout: Duration,

    /// Pause between connection attempts while waiting for nodes
    #[arg(long, default_value = DEFAULT_RETRY_INTERVAL, value_parser = humantime::parse_duration)]
    pub retry_interval: Duration,

    /// Give up waiting for nodes after this long, waits forever when not set
    #[arg(long, value_parser = humantime::parse_duration)]
    pub wait_deadline: Option<Duration>,

    /// Wait for all nodes at once instead of one after another
    #[arg(long, default_value_t = false)]
    pub concurrent_wait: bool,

    /// Disable colored log output
    #[arg(long, default_value_t = false)]
    pub no_ansi: bool,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        let mode = if self.concurrent_wait {
            WaitMode::Concurrent
        } else {
            WaitMode::Sequential
        };
        let readiness = ReadinessPolicy::default()
            .with_attempt_timeout(self.attempt_timeout)
            .with_retry_interval(self.retry_interval)
            .with_deadline(self.wait_deadline)
            .with_mode(mode);

        ClientConfig::new(&self.addr)
            .with_transaction_size(self.size)
            .with_peers(
                self.nodes
                    .iter()
                    .map(|node| node.trim())
                    .filter(|node| !node.is_empty())
                    .map(str::to_owned)
                    .collect(),
            )
            .with_readiness(readiness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_defaults() {
        let args = Args::parse_from(["tx-bench", "--addr", "http://127.0.0.1:7000"]);
        let config = args.client_config();
        assert_eq!(config.target, "http://127.0.0.1:7000");
        assert_eq!(config.transaction_size, 100);
        assert!(config.peers.is_empty());
        assert_eq!(config.readiness, ReadinessPolicy::default());
    }

    #[test]
    fn should_split_and_trim_nodes() {
        let args = Args::parse_from([
            "tx-bench",
            "--addr",
            "127.0.0.1:7000",
            "--nodes",
            "127.0.0.1:7001, /ip4/127.0.0.1/tcp/7002/http,,",
        ]);
        let config = args.client_config();
        assert_eq!(
            config.peers,
            vec!["127.0.0.1:7001", "/ip4/127.0.0.1/tcp/7002/http"]
        );
    }

    #[test]
    fn should_parse_readiness_options() {
        let args = Args::parse_from([
            "tx-bench",
            "--addr",
            "127.0.0.1:7000",
            "--size",
            "512",
            "--attempt-timeout",
            "250ms",
            "--retry-interval",
            "50ms",
            "--wait-deadline",
            "30s",
            "--concurrent-wait",
        ]);
        let config = args.client_config();
        assert_eq!(config.transaction_size, 512);
        assert_eq!(config.readiness.attempt_timeout, Duration::from_millis(250));
        assert_eq!(config.readiness.retry_interval, Duration::from_millis(50));
        assert_eq!(config.readiness.deadline, Some(Duration::from_secs(30)));
        assert_eq!(config.readiness.mode, WaitMode::Concurrent);
    }

    #[test]
    fn should_require_target_address() {
        let result = Args::try_parse_from(["tx-bench", "--size", "100"]);
        assert!(result.is_err());
    }
}
