//! Configuration for the status poller.

use std::time::Duration;

/// Default delay between status polls while unassigned.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default number of retries after a failed status fetch within one tick.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default delay between retries within one tick.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Configuration for the [`StatusPoller`](super::StatusPoller).
#[derive(Debug, Clone)]
pub struct StatusPollerConfig {
    /// Delay between polls while the emergency is unassigned.
    pub poll_interval: Duration,

    /// How many times a failed fetch is retried within a single tick before
    /// that tick's failure is surfaced to the consumer.
    pub retry_attempts: u32,

    /// Delay between retries within a tick.
    pub retry_delay: Duration,
}

impl Default for StatusPollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}
