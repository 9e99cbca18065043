use std::time::Duration;

pub const DEFAULT_TRANSACTION_SIZE: usize = 100;
pub const MIN_TRANSACTION_SIZE: usize = 9;
pub const DEFAULT_ATTEMPT_TIMEOUT: &str = "1s";
pub const DEFAULT_RETRY_INTERVAL: &str = "10ms";

pub(crate) const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(1);
pub(crate) const RETRY_INTERVAL: Duration = Duration::from_millis(10);
