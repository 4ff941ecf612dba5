//! Typed command builders
//!
//! Each builder knows its wire name, how to assemble the generic command
//! handed to an executor, and how to read the reply back into a typed value.

pub mod hash;
pub mod set;
pub mod sorted_set;

use std::time::Duration;

use redrive_core::{CommandObject, Reply, Result};

// Re-export hash commands
pub use hash::{HDelCommand, HGetAllCommand, HGetCommand, HSetCommand};

// Re-export set commands
pub use set::{SAddCommand, SCardCommand, SIsMemberCommand, SMembersCommand, SRemCommand};

// Re-export sorted set commands
pub use sorted_set::{ZAddCommand, ZCardCommand, ZRemCommand, ZScoreCommand};

/// Trait for commands that can be executed
pub trait Command {
    /// The return type of the command
    type Output;

    /// Get the command name
    fn command_name(&self) -> &str;

    /// Assemble the generic command sent over the executor seam
    fn build(&self) -> CommandObject;

    /// Parse the reply into the output type
    fn parse_reply(&self, reply: Reply) -> Result<Self::Output>;
}

/// GET command builder
pub struct GetCommand {
    key: String,
}

impl GetCommand {
    /// Create a new GET command
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Command for GetCommand {
    type Output = Option<String>;

    fn command_name(&self) -> &str {
        "GET"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("GET").key(&self.key)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        if reply.is_nil() {
            Ok(None)
        } else {
            Ok(Some(reply.as_string()?))
        }
    }
}

/// SET command builder
pub struct SetCommand {
    key: String,
    value: String,
    expiration: Option<Duration>,
    nx: bool,
    xx: bool,
}

impl SetCommand {
    /// Create a new SET command
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            expiration: None,
            nx: false,
            xx: false,
        }
    }

    /// Set expiration time (EX seconds)
    pub fn expire(mut self, duration: Duration) -> Self {
        self.expiration = Some(duration);
        self
    }

    /// Only set if key doesn't exist (NX)
    pub fn only_if_not_exists(mut self) -> Self {
        self.nx = true;
        self
    }

    /// Only set if key exists (XX)
    pub fn only_if_exists(mut self) -> Self {
        self.xx = true;
        self
    }
}

impl Command for SetCommand {
    type Output = bool;

    fn command_name(&self) -> &str {
        "SET"
    }

    fn build(&self) -> CommandObject {
        let mut command = CommandObject::new("SET").key(&self.key).arg(&self.value);

        if let Some(duration) = self.expiration {
            command = command.arg("EX").arg(duration.as_secs().to_string());
        }

        if self.nx {
            command = command.arg("NX");
        }

        if self.xx {
            command = command.arg("XX");
        }

        command
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        match reply {
            Reply::Simple(ref s) if s == "OK" => Ok(true),
            // NX or XX condition not met
            _ => Ok(false),
        }
    }
}

/// DEL command builder
pub struct DelCommand {
    keys: Vec<String>,
}

impl DelCommand {
    /// Create a new DEL command
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

impl Command for DelCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "DEL"
    }

    fn build(&self) -> CommandObject {
        self.keys
            .iter()
            .fold(CommandObject::new("DEL"), |command, key| command.key(key))
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

/// EXISTS command builder
pub struct ExistsCommand {
    key: String,
}

impl ExistsCommand {
    /// Create a new EXISTS command
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Command for ExistsCommand {
    type Output = bool;

    fn command_name(&self) -> &str {
        "EXISTS"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("EXISTS").key(&self.key)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        Ok(reply.as_int()? == 1)
    }
}

/// INCR command builder
pub struct IncrCommand {
    key: String,
}

impl IncrCommand {
    /// Create a new INCR command
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Command for IncrCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "INCR"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("INCR").key(&self.key)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

/// PING command builder
pub struct PingCommand;

impl PingCommand {
    /// Create a new PING command
    pub fn new() -> Self {
        Self
    }
}

impl Default for PingCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for PingCommand {
    type Output = String;

    fn command_name(&self) -> &str {
        "PING"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("PING")
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_string()
    }
}

/// FLUSHALL command builder
pub struct FlushAllCommand;

impl FlushAllCommand {
    /// Create a new FLUSHALL command
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlushAllCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for FlushAllCommand {
    type Output = bool;

    fn command_name(&self) -> &str {
        "FLUSHALL"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("FLUSHALL")
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        Ok(reply.is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_get_command() {
        let cmd = GetCommand::new("mykey");
        assert_eq!(cmd.command_name(), "GET");

        let built = cmd.build();
        assert_eq!(built.name(), "GET");
        assert_eq!(built.routing_key(), Some(&Bytes::from_static(b"mykey")));

        assert_eq!(cmd.parse_reply(Reply::Nil).unwrap(), None);
        assert_eq!(
            cmd.parse_reply(Reply::Bulk(Bytes::from_static(b"value")))
                .unwrap(),
            Some("value".to_string())
        );
    }

    #[test]
    fn test_set_command_basic() {
        let cmd = SetCommand::new("key", "value");
        let built = cmd.build();
        assert_eq!(built.args().len(), 2);
        assert!(cmd.parse_reply(Reply::Simple("OK".to_string())).unwrap());
    }

    #[test]
    fn test_set_command_with_expiration() {
        let cmd = SetCommand::new("key", "value").expire(Duration::from_secs(60));
        let built = cmd.build();
        assert_eq!(built.args().len(), 4); // key, value, EX, 60
        assert_eq!(built.args()[2], Bytes::from_static(b"EX"));
        assert_eq!(built.args()[3], Bytes::from_static(b"60"));
    }

    #[test]
    fn test_set_command_condition_not_met() {
        let cmd = SetCommand::new("key", "value").only_if_not_exists();
        let built = cmd.build();
        assert_eq!(built.args()[2], Bytes::from_static(b"NX"));
        assert!(!cmd.parse_reply(Reply::Nil).unwrap());
    }

    #[test]
    fn test_set_command_xx() {
        let cmd = SetCommand::new("key", "value").only_if_exists();
        let built = cmd.build();
        assert_eq!(built.args()[2], Bytes::from_static(b"XX"));
    }

    #[test]
    fn test_del_command_routes_on_first_key() {
        let cmd = DelCommand::new(vec!["key1".to_string(), "key2".to_string()]);
        let built = cmd.build();
        assert_eq!(built.args().len(), 2);
        assert_eq!(built.routing_key(), Some(&Bytes::from_static(b"key1")));
        assert_eq!(cmd.parse_reply(Reply::Integer(2)).unwrap(), 2);
    }

    #[test]
    fn test_exists_command() {
        let cmd = ExistsCommand::new("mykey");
        assert!(cmd.parse_reply(Reply::Integer(1)).unwrap());
        assert!(!cmd.parse_reply(Reply::Integer(0)).unwrap());
    }

    #[test]
    fn test_incr_command() {
        let cmd = IncrCommand::new("counter");
        assert_eq!(cmd.command_name(), "INCR");
        assert_eq!(cmd.parse_reply(Reply::Integer(5)).unwrap(), 5);
    }

    #[test]
    fn test_ping_command_has_no_routing_key() {
        let cmd = PingCommand::new();
        let built = cmd.build();
        assert_eq!(built.routing_key(), None);
        assert_eq!(
            cmd.parse_reply(Reply::Simple("PONG".to_string())).unwrap(),
            "PONG"
        );
    }

    #[test]
    fn test_flush_all_command() {
        let cmd = FlushAllCommand::new();
        assert_eq!(cmd.build().name(), "FLUSHALL");
        assert!(cmd.parse_reply(Reply::Simple("OK".to_string())).unwrap());
        assert!(!cmd.parse_reply(Reply::Nil).unwrap());
    }
}
