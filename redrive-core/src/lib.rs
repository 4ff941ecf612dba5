//! Core types for the redrive command execution library
//!
//! This crate provides the fundamental types shared by the redrive
//! execution layer: the generic command object, the reply value type,
//! the error taxonomy, and the executor configuration.

#![deny(warnings)]
#![warn(missing_docs)]

pub mod command;
pub mod config;
pub mod error;
pub mod reply;

pub use command::CommandObject;
pub use config::{PoolConfig, RetryConfig};
pub use error::{Error, Result};
pub use reply::{latin1_string, Reply};
