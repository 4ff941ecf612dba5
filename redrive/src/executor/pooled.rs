//! Pooled executor with a bounded work queue and elastic workers

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use redrive_core::{CommandObject, Error, PoolConfig, Reply, Result};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::executor::dispatch::{CommandEnvelope, CommandFuture};
use crate::executor::{run_attempt, CommandExecutor, Route};
use crate::provider::ConnectionProvider;

/// Executor that queues commands for a pool of worker tasks.
///
/// Submission never waits for capacity: a command is either handed to the
/// bounded queue or rejected on the spot. When the queue is full the pool
/// tries to grow by one worker, up to `max_workers`, and retries the
/// hand-off once before rejecting. Workers above `core_workers` retire
/// after sitting idle for `keep_alive`.
///
/// Each queued command is processed on one connection acquired from the
/// provider for just that command. Closing the executor stops admission
/// immediately, lets the workers drain everything already queued, then
/// closes the provider.
pub struct PooledExecutor {
    provider: Arc<dyn ConnectionProvider>,
    queue_tx: Mutex<Option<mpsc::Sender<CommandEnvelope>>>,
    queue_rx: Arc<Mutex<mpsc::Receiver<CommandEnvelope>>>,
    worker_count: Arc<AtomicUsize>,
    worker_seq: AtomicUsize,
    core_workers: usize,
    max_workers: usize,
    keep_alive: Duration,
    queue_capacity: usize,
    shutdown: AtomicBool,
    executed: Arc<AtomicUsize>,
    rejected: AtomicUsize,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

/// Point-in-time counters for one pooled executor
#[derive(Debug, Clone, Copy)]
pub struct ExecutorStats {
    /// Workers currently alive
    pub workers: usize,
    /// Commands sitting in the queue right now
    pub queued: usize,
    /// Commands processed since the executor started
    pub executed: usize,
    /// Commands refused at submission since the executor started
    pub rejected: usize,
}

impl PooledExecutor {
    /// Create the executor and start its core workers
    pub fn new(provider: Arc<dyn ConnectionProvider>, config: PoolConfig) -> Self {
        let core_workers = config.core_workers.max(1);
        let max_workers = config.max_workers.max(core_workers);
        let queue_capacity = config.queue_capacity.max(1);

        let (queue_tx, queue_rx) = mpsc::channel(queue_capacity);

        let mut executor = Self {
            provider,
            queue_tx: Mutex::new(Some(queue_tx)),
            queue_rx: Arc::new(Mutex::new(queue_rx)),
            worker_count: Arc::new(AtomicUsize::new(core_workers)),
            worker_seq: AtomicUsize::new(core_workers),
            core_workers,
            max_workers,
            keep_alive: config.keep_alive,
            queue_capacity,
            shutdown: AtomicBool::new(false),
            executed: Arc::new(AtomicUsize::new(0)),
            rejected: AtomicUsize::new(0),
            handles: Mutex::new(Vec::new()),
        };

        let handles: Vec<_> = (0..core_workers)
            .map(|worker_id| executor.spawn_worker(worker_id))
            .collect();
        *executor.handles.get_mut() = handles;

        info!(
            "Pooled executor started with {} workers (max {}, queue {})",
            core_workers, max_workers, queue_capacity
        );
        executor
    }

    /// Submit a command and get a future for its reply.
    ///
    /// Fails fast with [`Error::Rejected`] when the executor is closed or
    /// the queue stays full after one attempt to grow the pool.
    pub async fn execute_command_async(&self, command: CommandObject) -> Result<CommandFuture> {
        if self.shutdown.load(Ordering::SeqCst) {
            self.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(Error::Rejected("executor is closed".to_string()));
        }

        let queue_tx = self.queue_tx.lock().await;
        let Some(sender) = queue_tx.as_ref() else {
            self.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(Error::Rejected("executor is closed".to_string()));
        };

        let (envelope, future) = CommandEnvelope::new(command);
        let mut envelope = match sender.try_send(envelope) {
            Ok(()) => return Ok(future),
            Err(TrySendError::Full(envelope)) => envelope,
            Err(TrySendError::Closed(envelope)) => {
                self.rejected.fetch_add(1, Ordering::SeqCst);
                warn!(
                    "Queue closed under {}, rejecting",
                    envelope.command().name()
                );
                return Err(Error::Rejected("executor is closed".to_string()));
            }
        };

        // Full queue: claim one extra worker slot and retry the hand-off once
        if self.try_add_worker().await {
            envelope = match sender.try_send(envelope) {
                Ok(()) => return Ok(future),
                Err(TrySendError::Full(envelope) | TrySendError::Closed(envelope)) => envelope,
            };
        }

        self.rejected.fetch_add(1, Ordering::SeqCst);
        warn!("Queue full, rejecting {}", envelope.command().name());
        Err(Error::Rejected("queue is full".to_string()))
    }

    /// Snapshot the executor counters
    pub async fn stats(&self) -> ExecutorStats {
        let queued = match self.queue_tx.lock().await.as_ref() {
            Some(sender) => self.queue_capacity.saturating_sub(sender.capacity()),
            None => 0,
        };
        ExecutorStats {
            workers: self.worker_count.load(Ordering::SeqCst),
            queued,
            executed: self.executed.load(Ordering::SeqCst),
            rejected: self.rejected.load(Ordering::SeqCst),
        }
    }

    /// Claim a worker slot below `max_workers` and spawn into it
    async fn try_add_worker(&self) -> bool {
        let claimed = self
            .worker_count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                (count < self.max_workers).then_some(count + 1)
            });
        if claimed.is_err() {
            return false;
        }

        let worker_id = self.worker_seq.fetch_add(1, Ordering::SeqCst);
        let handle = self.spawn_worker(worker_id);
        self.handles.lock().await.push(handle);
        debug!(
            "Scaled up to {} workers",
            self.worker_count.load(Ordering::SeqCst)
        );
        true
    }

    fn spawn_worker(&self, worker_id: usize) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let queue_rx = Arc::clone(&self.queue_rx);
        let worker_count = Arc::clone(&self.worker_count);
        let executed = Arc::clone(&self.executed);
        let core_workers = self.core_workers;
        let keep_alive = self.keep_alive;

        tokio::spawn(async move {
            debug!("Worker {} started", worker_id);
            loop {
                let received = {
                    let mut queue_rx = queue_rx.lock().await;
                    timeout(keep_alive, queue_rx.recv()).await
                };
                match received {
                    Ok(Some(envelope)) => {
                        process_envelope(provider.as_ref(), envelope).await;
                        executed.fetch_add(1, Ordering::SeqCst);
                    }
                    Ok(None) => break,
                    Err(_) => {
                        if try_retire(&worker_count, core_workers) {
                            debug!("Worker {} retired after idle timeout", worker_id);
                            return;
                        }
                    }
                }
            }
            worker_count.fetch_sub(1, Ordering::SeqCst);
            debug!("Worker {} stopped", worker_id);
        })
    }
}

/// Run one queued command and complete its envelope either way
async fn process_envelope(provider: &dyn ConnectionProvider, mut envelope: CommandEnvelope) {
    match run_attempt(provider, envelope.command(), Route::Routed).await {
        Ok(reply) => {
            envelope.set_reply(Ok(reply));
            envelope.complete();
        }
        Err(err) => {
            debug!("Queued {} failed: {}", envelope.command().name(), err);
            envelope.complete_exceptionally(err);
        }
    }
}

/// Give up one worker slot, but only while the pool is above its core size
fn try_retire(worker_count: &AtomicUsize, core_workers: usize) -> bool {
    let mut count = worker_count.load(Ordering::SeqCst);
    while count > core_workers {
        match worker_count.compare_exchange(
            count,
            count - 1,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => return true,
            Err(actual) => count = actual,
        }
    }
    false
}

#[async_trait::async_trait]
impl CommandExecutor for PooledExecutor {
    async fn execute_command(&self, command: &CommandObject) -> Result<Reply> {
        let future = self.execute_command_async(command.clone()).await?;
        future.await
    }

    async fn close(&self) -> Result<()> {
        if self.shutdown.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // Dropping the sender closes the queue once drained
        let sender = self.queue_tx.lock().await.take();
        drop(sender);

        let handles = {
            let mut handles = self.handles.lock().await;
            std::mem::take(&mut *handles)
        };
        for handle in handles {
            if let Err(err) = handle.await {
                warn!("Worker task ended abnormally: {}", err);
            }
        }

        info!("Pooled executor closed");
        self.provider.close().await
    }
}
