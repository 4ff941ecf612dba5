//! Set command builders

use std::collections::HashSet;

use redrive_core::{CommandObject, Reply, Result};

use super::Command;

/// SADD command - add one or more members to a set
#[derive(Debug, Clone)]
pub struct SAddCommand {
    key: String,
    members: Vec<String>,
}

impl SAddCommand {
    /// Create a new SADD command
    pub fn new(key: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            key: key.into(),
            members,
        }
    }
}

impl Command for SAddCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "SADD"
    }

    fn build(&self) -> CommandObject {
        let mut command = CommandObject::new("SADD").key(&self.key);
        for member in &self.members {
            command = command.arg(member);
        }
        command
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

/// SREM command - remove one or more members from a set
#[derive(Debug, Clone)]
pub struct SRemCommand {
    key: String,
    members: Vec<String>,
}

impl SRemCommand {
    /// Create a new SREM command
    pub fn new(key: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            key: key.into(),
            members,
        }
    }
}

impl Command for SRemCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "SREM"
    }

    fn build(&self) -> CommandObject {
        let mut command = CommandObject::new("SREM").key(&self.key);
        for member in &self.members {
            command = command.arg(member);
        }
        command
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

/// SMEMBERS command - get all members of a set
#[derive(Debug, Clone)]
pub struct SMembersCommand {
    key: String,
}

impl SMembersCommand {
    /// Create a new SMEMBERS command
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Command for SMembersCommand {
    type Output = HashSet<String>;

    fn command_name(&self) -> &str {
        "SMEMBERS"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("SMEMBERS").key(&self.key)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_array()?.iter().map(Reply::as_string).collect()
    }
}

/// SISMEMBER command - check whether a member is in a set
#[derive(Debug, Clone)]
pub struct SIsMemberCommand {
    key: String,
    member: String,
}

impl SIsMemberCommand {
    /// Create a new SISMEMBER command
    pub fn new(key: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            member: member.into(),
        }
    }
}

impl Command for SIsMemberCommand {
    type Output = bool;

    fn command_name(&self) -> &str {
        "SISMEMBER"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("SISMEMBER")
            .key(&self.key)
            .arg(&self.member)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        Ok(reply.as_int()? == 1)
    }
}

/// SCARD command - get the number of members in a set
#[derive(Debug, Clone)]
pub struct SCardCommand {
    key: String,
}

impl SCardCommand {
    /// Create a new SCARD command
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Command for SCardCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "SCARD"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("SCARD").key(&self.key)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}
