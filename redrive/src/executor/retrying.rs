//! Sequential executor with bounded retries and harmonic backoff

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use redrive_core::{CommandObject, Error, Reply, Result, RetryConfig};
use tokio::sync::watch;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::executor::{run_attempt, CommandExecutor, Route};
use crate::provider::ConnectionProvider;

/// Executor that runs every attempt inline and retries on transient failure.
///
/// Each call gets a budget of `max_attempts` tries and one wall-clock
/// deadline of `max_total_retries_duration`, measured from the moment the
/// call starts. Connection-layer failures escalate a consecutive-failure
/// counter; once two pile up without a successful pause in between, the
/// executor sleeps a slice of the remaining budget before the next try.
/// Server errors are retried immediately and reported to the failure
/// handler, if one is installed. Any other error is returned as-is.
///
/// Every attempt acquires a fresh connection from the provider and releases
/// it before the attempt's outcome is inspected, so no connection is held
/// across a backoff sleep.
pub struct RetryingExecutor {
    provider: Arc<dyn ConnectionProvider>,
    config: RetryConfig,
    failure_handler: Option<Arc<dyn Fn(&Error) + Send + Sync>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    closed: AtomicBool,
}

impl RetryingExecutor {
    /// Create an executor over the given provider
    pub fn new(provider: Arc<dyn ConnectionProvider>, config: RetryConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            provider,
            config,
            failure_handler: None,
            shutdown_tx,
            shutdown_rx,
            closed: AtomicBool::new(false),
        }
    }

    /// Install a callback invoked once per server-rejected attempt.
    ///
    /// The handler observes each application-level failure that is about to
    /// be retried. Connection failures and terminal errors bypass it.
    #[must_use]
    pub fn with_failure_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        self.failure_handler = Some(Arc::new(handler));
        self
    }

    async fn execute_with_retries(
        &self,
        command: &CommandObject,
        route: Route,
    ) -> Result<Reply> {
        let max_attempts = self.config.max_attempts.max(1);
        let deadline = Instant::now() + self.config.max_total_retries_duration;
        let mut attempts_left = max_attempts;
        let mut consecutive_connection_failures: u32 = 0;

        loop {
            let err = match run_attempt(self.provider.as_ref(), command, route).await {
                Ok(reply) => return Ok(reply),
                Err(err) if err.is_connection_failure() => {
                    consecutive_connection_failures += 1;
                    err
                }
                Err(err) if err.is_application_error() => {
                    if let Some(handler) = &self.failure_handler {
                        handler(&err);
                    }
                    err
                }
                Err(err) => return Err(err),
            };

            debug!(
                "Attempt on {} failed ({} attempts left): {}",
                command.name(),
                attempts_left - 1,
                err
            );

            if Instant::now() > deadline {
                return Err(Error::DeadlineExceeded);
            }

            if consecutive_connection_failures >= 2 {
                let remaining = deadline.saturating_duration_since(Instant::now());
                let delay = backoff_schedule(attempts_left, remaining);
                debug!(
                    "Backing off {}ms before retrying {}",
                    delay.as_millis(),
                    command.name()
                );
                self.interruptible_sleep(delay).await?;
                consecutive_connection_failures = 0;
            }

            attempts_left -= 1;
            if attempts_left == 0 {
                return Err(Error::AttemptsExhausted {
                    attempts: max_attempts,
                    last: Box::new(err),
                });
            }
        }
    }

    /// Sleep that ends early when the executor is closed
    async fn interruptible_sleep(&self, duration: Duration) -> Result<()> {
        let mut shutdown_rx = self.shutdown_rx.clone();
        if *shutdown_rx.borrow_and_update() {
            return Err(Error::Interrupted("executor is closed".to_string()));
        }
        tokio::select! {
            () = sleep(duration) => Ok(()),
            _ = shutdown_rx.changed() => {
                Err(Error::Interrupted("backoff cut short by close".to_string()))
            }
        }
    }
}

/// Compute the pause before the next attempt.
///
/// The remaining wall-clock budget is divided by
/// `attempts_left * (attempts_left + 1)`, so with `A` attempts left the
/// pause is `remaining / (A * (A + 1))`. Summed over a run of consecutive
/// failures the pauses telescope and never spend more than the budget,
/// while each successive pause under a shrinking attempt count grows
/// longer. With no attempts left there is nothing to wait for.
pub fn backoff_schedule(attempts_left: u32, remaining: Duration) -> Duration {
    if attempts_left == 0 {
        return Duration::ZERO;
    }
    let slots = u128::from(attempts_left) * (u128::from(attempts_left) + 1);
    let millis = remaining.as_millis() / slots;
    Duration::from_millis(millis as u64)
}

#[async_trait::async_trait]
impl CommandExecutor for RetryingExecutor {
    async fn execute_command(&self, command: &CommandObject) -> Result<Reply> {
        self.execute_with_retries(command, Route::Routed).await
    }

    async fn execute_broadcast_command(&self, command: &CommandObject) -> Result<Reply> {
        self.execute_with_retries(command, Route::Any).await
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.shutdown_tx.send_replace(true);
        info!("Retrying executor closed");
        self.provider.close().await
    }
}
