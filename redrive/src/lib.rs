//! Command execution core for key-value store clients
//!
//! `redrive` is the execution layer of a key-value client: it takes an
//! encoded [`CommandObject`], borrows a connection from a
//! [`ConnectionProvider`], runs the command, classifies what went wrong,
//! and decides whether and how to try again. Two executors implement the
//! same [`CommandExecutor`] contract:
//!
//! - [`RetryingExecutor`] runs attempts sequentially with an attempt budget,
//!   a wall-clock deadline, and a harmonic backoff on consecutive connection
//!   failures
//! - [`PooledExecutor`] hands each command to a bounded worker pool and
//!   returns a [`CommandFuture`] immediately, rejecting new work outright
//!   when the queue is full; it never retries
//!
//! Connection management itself (dialing, topology, pooling of sockets) is
//! deliberately out of scope: implement [`ConnectionProvider`] and
//! [`Connection`] for your transport and either executor drives it.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use redrive::{Client, ConnectionProvider, RetryConfig};
//!
//! async fn demo(provider: Arc<dyn ConnectionProvider>) -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::retrying(provider, RetryConfig::default());
//!
//!     client.set("greeting", "hello").await?;
//!     let value: Option<String> = client.get("greeting").await?;
//!     println!("Value: {:?}", value);
//!
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

#![deny(warnings)]
#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::future_not_send)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::unused_async)]

pub mod client;
pub mod commands;
pub mod executor;
pub mod provider;

pub use client::Client;
pub use commands::Command;
pub use executor::{
    CommandExecutor, CommandFuture, ExecutorStats, PooledExecutor, RetryingExecutor,
};
pub use provider::{Connection, ConnectionProvider};

pub use redrive_core::{latin1_string, CommandObject, Error, PoolConfig, Reply, Result, RetryConfig};
