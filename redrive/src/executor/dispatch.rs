//! Envelope plumbing between submitters and workers
//!
//! A submitted command travels inside a [`CommandEnvelope`]: the command
//! itself, a write-once reply slot, and the channel back to the caller's
//! [`CommandFuture`]. Workers fill the slot and complete the envelope; the
//! caller only ever sees the future.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use redrive_core::{CommandObject, Error, Reply, Result};
use tokio::sync::oneshot;

/// Write-once holder for a command's outcome.
///
/// The first value written wins; later writes are ignored. Taking from a
/// slot that was never written yields `Ok(Reply::Nil)`.
#[derive(Debug, Default)]
pub(crate) struct ReplySlot {
    value: Option<Result<Reply>>,
}

impl ReplySlot {
    /// Store the outcome unless one is already present
    pub(crate) fn set(&mut self, value: Result<Reply>) {
        if self.value.is_none() {
            self.value = Some(value);
        }
    }

    /// Consume the slot, defaulting to a nil reply when nothing was stored
    pub(crate) fn take(self) -> Result<Reply> {
        self.value.unwrap_or(Ok(Reply::Nil))
    }
}

/// One queued command together with its reply path
#[derive(Debug)]
pub(crate) struct CommandEnvelope {
    command: CommandObject,
    slot: ReplySlot,
    reply_tx: oneshot::Sender<Result<Reply>>,
}

impl CommandEnvelope {
    /// Wrap a command, returning the envelope and the caller's future
    pub(crate) fn new(command: CommandObject) -> (Self, CommandFuture) {
        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = Self {
            command,
            slot: ReplySlot::default(),
            reply_tx,
        };
        (envelope, CommandFuture { receiver: reply_rx })
    }

    /// The command this envelope carries
    pub(crate) fn command(&self) -> &CommandObject {
        &self.command
    }

    /// Record the outcome without completing yet
    pub(crate) fn set_reply(&mut self, result: Result<Reply>) {
        self.slot.set(result);
    }

    /// Deliver whatever the slot holds to the waiting future
    pub(crate) fn complete(self) {
        // Send the result back (ignore send errors - client may have dropped)
        let _ = self.reply_tx.send(self.slot.take());
    }

    /// Record a failure and complete in one step.
    ///
    /// An outcome already in the slot still wins; the error only lands when
    /// the slot is empty.
    pub(crate) fn complete_exceptionally(mut self, err: Error) {
        self.slot.set(Err(err));
        self.complete();
    }
}

/// Handle to a command's eventual reply.
///
/// Returned by the pooled executor at submission time. Resolves once a
/// worker completes the envelope. If the envelope is dropped before
/// completion the future resolves to [`Error::Interrupted`].
#[derive(Debug)]
pub struct CommandFuture {
    receiver: oneshot::Receiver<Result<Reply>>,
}

impl Future for CommandFuture {
    type Output = Result<Reply>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(Error::Interrupted(
                "command was dropped before completion".to_string(),
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ping() -> CommandObject {
        CommandObject::new("PING")
    }

    #[test]
    fn test_slot_keeps_first_value() {
        let mut slot = ReplySlot::default();
        slot.set(Ok(Reply::Integer(1)));
        slot.set(Ok(Reply::Integer(2)));
        assert_eq!(slot.take().unwrap(), Reply::Integer(1));
    }

    #[test]
    fn test_empty_slot_yields_nil() {
        let slot = ReplySlot::default();
        assert_eq!(slot.take().unwrap(), Reply::Nil);
    }

    #[tokio::test]
    async fn test_complete_delivers_slot_value() {
        let (mut envelope, future) = CommandEnvelope::new(ping());
        assert_eq!(envelope.command().name(), "PING");

        envelope.set_reply(Ok(Reply::Simple("PONG".to_string())));
        envelope.complete();

        assert_eq!(future.await.unwrap(), Reply::Simple("PONG".to_string()));
    }

    #[tokio::test]
    async fn test_complete_exceptionally_delivers_error() {
        let (envelope, future) = CommandEnvelope::new(ping());
        envelope.complete_exceptionally(Error::Connection("refused".to_string()));

        match future.await {
            Err(Error::Connection(message)) => assert_eq!(message, "refused"),
            other => panic!("Expected connection error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_earlier_reply_wins_over_late_error() {
        let (mut envelope, future) = CommandEnvelope::new(ping());
        envelope.set_reply(Ok(Reply::Integer(7)));
        envelope.complete_exceptionally(Error::Server("ignored".to_string()));

        assert_eq!(future.await.unwrap(), Reply::Integer(7));
    }

    #[tokio::test]
    async fn test_dropped_envelope_interrupts_future() {
        let (envelope, future) = CommandEnvelope::new(ping());
        drop(envelope);

        match future.await {
            Err(Error::Interrupted(message)) => {
                assert_eq!(message, "command was dropped before completion");
            }
            other => panic!("Expected interruption, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_without_receiver_is_harmless() {
        let (envelope, future) = CommandEnvelope::new(ping());
        drop(future);
        envelope.complete();
    }
}
