//! Connection abstractions consumed by the executors
//!
//! The executors never open sockets themselves. They ask a
//! [`ConnectionProvider`] for a [`Connection`] scoped to one attempt, run a
//! single command on it, and release it again. Implementations own all
//! transport concerns: dialing, handshakes, topology, and any pooling of the
//! underlying links.

use redrive_core::{CommandObject, Reply, Result};

/// A connection capable of executing one command at a time.
///
/// A connection is borrowed for exactly one attempt and released on every
/// exit path, so implementations never see interleaved commands on the same
/// value. `execute` reports infrastructure problems as
/// connection-classified errors ([`redrive_core::Error::Connection`],
/// [`redrive_core::Error::Io`], [`redrive_core::Error::Timeout`]) and
/// store-side rejections as [`redrive_core::Error::Server`]; the executors
/// base their retry decisions on that split.
#[async_trait::async_trait]
pub trait Connection: Send {
    /// Execute one encoded command and return its decoded reply
    async fn execute(&mut self, command: &CommandObject) -> Result<Reply>;

    /// Release the connection.
    ///
    /// Called exactly once per borrow, whatever the attempt's outcome.
    async fn close(&mut self) -> Result<()>;
}

/// Source of connections, shared by all attempts and workers.
///
/// Implementations must tolerate concurrent calls; the pooled executor
/// acquires from several worker tasks at once.
#[async_trait::async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Obtain a connection to any reachable node
    async fn get_connection(&self) -> Result<Box<dyn Connection>>;

    /// Obtain a connection suitable for the command's routing key.
    ///
    /// The default implementation ignores routing and hands out any
    /// connection, which is correct for single-node providers.
    async fn get_connection_for(&self, _command: &CommandObject) -> Result<Box<dyn Connection>> {
        self.get_connection().await
    }

    /// Tear down the provider and any resources it owns
    async fn close(&self) -> Result<()>;
}
