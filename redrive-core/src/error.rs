//! Error types for command execution

use std::io;
use thiserror::Error;

/// Result type for command execution
pub type Result<T> = std::result::Result<T, Error>;

/// Error type covering every failure an executor can surface
#[derive(Error, Debug)]
pub enum Error {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Connection could not be established or used
    #[error("Connection error: {0}")]
    Connection(String),

    /// Operation timed out at the connection layer
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Server rejected the request
    #[error("Server error: {0}")]
    Server(String),

    /// Type conversion error
    #[error("Type conversion error: {0}")]
    Type(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Wall-clock retry budget ran out before the call succeeded
    #[error("Retry deadline exceeded")]
    DeadlineExceeded,

    /// Every configured attempt failed; carries the last failure seen
    #[error("No attempts left after {attempts} tries")]
    AttemptsExhausted {
        /// How many attempts were made
        attempts: u32,
        /// The failure observed on the final attempt
        #[source]
        last: Box<Error>,
    },

    /// A wait was cut short, usually by executor shutdown
    #[error("Interrupted: {0}")]
    Interrupted(String),

    /// Work was refused at the admission boundary
    #[error("Command rejected: {0}")]
    Rejected(String),
}

impl Error {
    /// Check whether this is a transient connection-layer failure.
    ///
    /// Connection failures are the only errors that escalate backoff in the
    /// retrying executor.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Connection(_) | Error::Timeout(_)
        )
    }

    /// Check whether the server itself rejected the request.
    ///
    /// Application-level failures are retried without backoff escalation and
    /// are the only errors reported to a configured failure handler.
    pub fn is_application_error(&self) -> bool {
        matches!(self, Error::Server(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_connection_failure_classification() {
        assert!(Error::Connection("refused".to_string()).is_connection_failure());
        assert!(Error::Timeout("read".to_string()).is_connection_failure());
        let io = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(io.is_connection_failure());

        assert!(!Error::Server("WRONGTYPE".to_string()).is_connection_failure());
        assert!(!Error::DeadlineExceeded.is_connection_failure());
    }

    #[test]
    fn test_application_error_classification() {
        assert!(Error::Server("ERR syntax".to_string()).is_application_error());
        assert!(!Error::Connection("refused".to_string()).is_application_error());
        assert!(!Error::Type("not an integer".to_string()).is_application_error());
    }

    #[test]
    fn test_attempts_exhausted_preserves_cause() {
        let error = Error::AttemptsExhausted {
            attempts: 3,
            last: Box::new(Error::Connection("refused".to_string())),
        };

        assert_eq!(error.to_string(), "No attempts left after 3 tries");
        let source = error.source().expect("cause should be attached");
        assert_eq!(source.to_string(), "Connection error: refused");
    }

    #[test]
    fn test_terminal_errors_have_no_retry_classification() {
        for error in [
            Error::DeadlineExceeded,
            Error::Interrupted("shutdown".to_string()),
            Error::Rejected("queue full".to_string()),
        ] {
            assert!(!error.is_connection_failure());
            assert!(!error.is_application_error());
        }
    }
}
