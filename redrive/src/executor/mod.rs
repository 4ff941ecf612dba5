//! Command executors
//!
//! Both executors implement [`CommandExecutor`] so callers stay unaware of
//! which execution policy is in effect. The retrying executor runs attempts
//! sequentially within one call; the pooled executor fans work out to a
//! bounded set of worker tasks.

use redrive_core::{CommandObject, Reply, Result};
use tracing::warn;

use crate::provider::ConnectionProvider;

pub mod dispatch;
pub mod pooled;
pub mod retrying;

pub use dispatch::CommandFuture;
pub use pooled::{ExecutorStats, PooledExecutor};
pub use retrying::RetryingExecutor;

/// The one contract every execution strategy provides
#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute a command and return its reply, or one terminal failure
    async fn execute_command(&self, command: &CommandObject) -> Result<Reply>;

    /// Execute a command meant for every node.
    ///
    /// Same contract as [`execute_command`](CommandExecutor::execute_command),
    /// distinguished by intent. The default implementation simply delegates.
    async fn execute_broadcast_command(&self, command: &CommandObject) -> Result<Reply> {
        self.execute_command(command).await
    }

    /// Tear down the executor and the provider it owns.
    ///
    /// Safe to call more than once.
    async fn close(&self) -> Result<()>;
}

/// How a connection is chosen for one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    /// Follow the command's routing key
    Routed,
    /// Any node will do
    Any,
}

/// Run one attempt: acquire a connection, execute the command, release.
///
/// The release runs on every exit path of a completed attempt. An
/// acquisition failure returns with nothing held. A release failure after a
/// finished execute is logged and does not change the attempt's outcome.
pub(crate) async fn run_attempt(
    provider: &dyn ConnectionProvider,
    command: &CommandObject,
    route: Route,
) -> Result<Reply> {
    let mut connection = match route {
        Route::Routed => provider.get_connection_for(command).await?,
        Route::Any => provider.get_connection().await?,
    };

    let result = connection.execute(command).await;

    if let Err(err) = connection.close().await {
        warn!("Failed to release connection after {}: {}", command.name(), err);
    }

    result
}
