//! Configuration types for the executors

use std::num::NonZeroUsize;
use std::time::Duration;

/// Configuration for the retrying executor
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts for one call (at least 1)
    pub max_attempts: u32,

    /// Wall-clock budget for one call across all attempts and backoffs
    pub max_total_retries_duration: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_total_retries_duration: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of attempts
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the wall-clock budget for the whole call
    pub fn with_max_total_retries_duration(mut self, duration: Duration) -> Self {
        self.max_total_retries_duration = duration;
        self
    }
}

/// Configuration for the pooled async executor
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of workers kept alive permanently
    pub core_workers: usize,

    /// Upper bound on workers, reached only under queue pressure
    pub max_workers: usize,

    /// How long an excess worker may sit idle before retiring
    pub keep_alive: Duration,

    /// Capacity of the bounded work queue
    pub queue_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        let parallelism = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self {
            core_workers: parallelism,
            max_workers: parallelism * 2,
            keep_alive: Duration::from_secs(60),
            queue_capacity: 1024,
        }
    }
}

impl PoolConfig {
    /// Set the number of core workers
    pub fn with_core_workers(mut self, core_workers: usize) -> Self {
        self.core_workers = core_workers;
        self
    }

    /// Set the maximum number of workers
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Set the idle keep-alive for excess workers
    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Set the work queue capacity
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.max_total_retries_duration, Duration::from_secs(10));
    }

    #[test]
    fn test_retry_builder_pattern() {
        let config = RetryConfig::default()
            .with_max_attempts(5)
            .with_max_total_retries_duration(Duration::from_secs(30));

        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.max_total_retries_duration, Duration::from_secs(30));
    }

    #[test]
    fn test_pool_defaults_track_parallelism() {
        let config = PoolConfig::default();
        assert!(config.core_workers >= 1);
        assert_eq!(config.max_workers, config.core_workers * 2);
        assert_eq!(config.keep_alive, Duration::from_secs(60));
        assert_eq!(config.queue_capacity, 1024);
    }

    #[test]
    fn test_pool_builder_pattern() {
        let config = PoolConfig::default()
            .with_core_workers(2)
            .with_max_workers(8)
            .with_keep_alive(Duration::from_secs(5))
            .with_queue_capacity(64);

        assert_eq!(config.core_workers, 2);
        assert_eq!(config.max_workers, 8);
        assert_eq!(config.keep_alive, Duration::from_secs(5));
        assert_eq!(config.queue_capacity, 64);
    }
}
