//! High-level typed client
//!
//! `Client` pairs the typed command builders with one executor. It owns no
//! connections of its own; everything runs through the executor it wraps.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use redrive_core::{PoolConfig, Result, RetryConfig};

use crate::commands::{
    Command, DelCommand, ExistsCommand, FlushAllCommand, GetCommand, HDelCommand, HGetAllCommand,
    HGetCommand, HSetCommand, IncrCommand, PingCommand, SAddCommand, SCardCommand,
    SIsMemberCommand, SMembersCommand, SRemCommand, SetCommand, ZAddCommand, ZCardCommand,
    ZRemCommand, ZScoreCommand,
};
use crate::executor::{CommandExecutor, PooledExecutor, RetryingExecutor};
use crate::provider::ConnectionProvider;

/// Typed facade over a command executor
#[derive(Clone)]
pub struct Client {
    executor: Arc<dyn CommandExecutor>,
}

impl Client {
    /// Wrap an existing executor
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Build a client over a retrying executor.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use redrive::{Client, ConnectionProvider, RetryConfig};
    ///
    /// async fn demo(provider: Arc<dyn ConnectionProvider>) -> redrive::Result<()> {
    ///     let client = Client::retrying(provider, RetryConfig::default());
    ///     let pong = client.ping().await?;
    ///     println!("{pong}");
    ///     client.close().await
    /// }
    /// ```
    pub fn retrying(provider: Arc<dyn ConnectionProvider>, config: RetryConfig) -> Self {
        Self::new(Arc::new(RetryingExecutor::new(provider, config)))
    }

    /// Build a client over a pooled executor
    pub fn pooled(provider: Arc<dyn ConnectionProvider>, config: PoolConfig) -> Self {
        Self::new(Arc::new(PooledExecutor::new(provider, config)))
    }

    /// Execute any typed command
    pub async fn execute<C: Command>(&self, command: C) -> Result<C::Output> {
        let built = command.build();
        let reply = self.executor.execute_command(&built).await?;
        command.parse_reply(reply)
    }

    /// Execute a typed command meant for every node
    pub async fn execute_broadcast<C: Command>(&self, command: C) -> Result<C::Output> {
        let built = command.build();
        let reply = self.executor.execute_broadcast_command(&built).await?;
        command.parse_reply(reply)
    }

    /// Tear down the executor and its provider
    pub async fn close(&self) -> Result<()> {
        self.executor.close().await
    }

    // High-level command methods

    /// Get the value of a key
    pub async fn get(&self, key: impl Into<String>) -> Result<Option<String>> {
        self.execute(GetCommand::new(key)).await
    }

    /// Set the value of a key
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Result<bool> {
        self.execute(SetCommand::new(key, value)).await
    }

    /// Set the value of a key with expiration
    pub async fn set_ex(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        expiration: Duration,
    ) -> Result<bool> {
        self.execute(SetCommand::new(key, value).expire(expiration))
            .await
    }

    /// Set the value of a key only if it doesn't exist
    pub async fn set_nx(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<bool> {
        self.execute(SetCommand::new(key, value).only_if_not_exists())
            .await
    }

    /// Delete one or more keys
    pub async fn del(&self, keys: Vec<String>) -> Result<i64> {
        self.execute(DelCommand::new(keys)).await
    }

    /// Check if a key exists
    pub async fn exists(&self, key: impl Into<String>) -> Result<bool> {
        self.execute(ExistsCommand::new(key)).await
    }

    /// Increment the integer value of a key by one
    pub async fn incr(&self, key: impl Into<String>) -> Result<i64> {
        self.execute(IncrCommand::new(key)).await
    }

    // Hash command methods

    /// Set one hash field
    pub async fn hset(
        &self,
        key: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<i64> {
        self.execute(HSetCommand::new(key, field, value)).await
    }

    /// Get the value of a hash field
    pub async fn hget(
        &self,
        key: impl Into<String>,
        field: impl Into<String>,
    ) -> Result<Option<String>> {
        self.execute(HGetCommand::new(key, field)).await
    }

    /// Delete one or more hash fields
    pub async fn hdel(&self, key: impl Into<String>, fields: Vec<String>) -> Result<i64> {
        self.execute(HDelCommand::new(key, fields)).await
    }

    /// Get all fields and values of a hash
    pub async fn hgetall(&self, key: impl Into<String>) -> Result<HashMap<String, String>> {
        self.execute(HGetAllCommand::new(key)).await
    }

    // Set command methods

    /// Add one or more members to a set
    pub async fn sadd(&self, key: impl Into<String>, members: Vec<String>) -> Result<i64> {
        self.execute(SAddCommand::new(key, members)).await
    }

    /// Remove one or more members from a set
    pub async fn srem(&self, key: impl Into<String>, members: Vec<String>) -> Result<i64> {
        self.execute(SRemCommand::new(key, members)).await
    }

    /// Get all members of a set
    pub async fn smembers(&self, key: impl Into<String>) -> Result<HashSet<String>> {
        self.execute(SMembersCommand::new(key)).await
    }

    /// Check whether a member is in a set
    pub async fn sismember(
        &self,
        key: impl Into<String>,
        member: impl Into<String>,
    ) -> Result<bool> {
        self.execute(SIsMemberCommand::new(key, member)).await
    }

    /// Get the number of members in a set
    pub async fn scard(&self, key: impl Into<String>) -> Result<i64> {
        self.execute(SCardCommand::new(key)).await
    }

    // Sorted set command methods

    /// Add scored members to a sorted set
    pub async fn zadd(
        &self,
        key: impl Into<String>,
        entries: Vec<(f64, String)>,
    ) -> Result<i64> {
        self.execute(ZAddCommand::new(key, entries)).await
    }

    /// Remove members from a sorted set
    pub async fn zrem(&self, key: impl Into<String>, members: Vec<String>) -> Result<i64> {
        self.execute(ZRemCommand::new(key, members)).await
    }

    /// Get the score of a sorted set member
    pub async fn zscore(
        &self,
        key: impl Into<String>,
        member: impl Into<String>,
    ) -> Result<Option<f64>> {
        self.execute(ZScoreCommand::new(key, member)).await
    }

    /// Get the number of members in a sorted set
    pub async fn zcard(&self, key: impl Into<String>) -> Result<i64> {
        self.execute(ZCardCommand::new(key)).await
    }

    // Server command methods

    /// Ping the server
    pub async fn ping(&self) -> Result<String> {
        self.execute(PingCommand::new()).await
    }

    /// Flush every node's dataset
    pub async fn flush_all(&self) -> Result<bool> {
        self.execute_broadcast(FlushAllCommand::new()).await
    }
}
