//! Sorted set command builders

use redrive_core::{CommandObject, Error, Reply, Result};

use crate::commands::Command;

/// ZADD command - add scored members to a sorted set
#[derive(Debug, Clone)]
pub struct ZAddCommand {
    key: String,
    entries: Vec<(f64, String)>,
}

impl ZAddCommand {
    /// Create a new ZADD command from `(score, member)` pairs
    pub fn new(key: impl Into<String>, entries: Vec<(f64, String)>) -> Self {
        Self {
            key: key.into(),
            entries,
        }
    }
}

impl Command for ZAddCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "ZADD"
    }

    fn build(&self) -> CommandObject {
        let mut command = CommandObject::new("ZADD").key(&self.key);
        for (score, member) in &self.entries {
            command = command.arg(score.to_string()).arg(member);
        }
        command
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

/// ZREM command - remove members from a sorted set
#[derive(Debug, Clone)]
pub struct ZRemCommand {
    key: String,
    members: Vec<String>,
}

impl ZRemCommand {
    /// Create a new ZREM command
    pub fn new(key: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            key: key.into(),
            members,
        }
    }
}

impl Command for ZRemCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "ZREM"
    }

    fn build(&self) -> CommandObject {
        let mut command = CommandObject::new("ZREM").key(&self.key);
        for member in &self.members {
            command = command.arg(member);
        }
        command
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

/// ZSCORE command - get the score of a member
#[derive(Debug, Clone)]
pub struct ZScoreCommand {
    key: String,
    member: String,
}

impl ZScoreCommand {
    /// Create a new ZSCORE command
    pub fn new(key: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            member: member.into(),
        }
    }
}

impl Command for ZScoreCommand {
    type Output = Option<f64>;

    fn command_name(&self) -> &str {
        "ZSCORE"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("ZSCORE")
            .key(&self.key)
            .arg(&self.member)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        if reply.is_nil() {
            return Ok(None);
        }
        let text = reply.as_string()?;
        text.parse::<f64>()
            .map(Some)
            .map_err(|_| Error::Type(format!("not a score: {text}")))
    }
}

/// ZCARD command - get the number of members in a sorted set
#[derive(Debug, Clone)]
pub struct ZCardCommand {
    key: String,
}

impl ZCardCommand {
    /// Create a new ZCARD command
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Command for ZCardCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "ZCARD"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("ZCARD").key(&self.key)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_zadd_command_orders_score_before_member() {
        let cmd = ZAddCommand::new("board", vec![(1.5, "alice".to_string())]);
        let built = cmd.build();
        assert_eq!(built.name(), "ZADD");
        assert_eq!(built.args().len(), 3); // key, score, member
        assert_eq!(built.args()[1], Bytes::from_static(b"1.5"));
        assert_eq!(built.args()[2], Bytes::from_static(b"alice"));
        assert_eq!(cmd.parse_reply(Reply::Integer(1)).unwrap(), 1);
    }

    #[test]
    fn test_zrem_command() {
        let cmd = ZRemCommand::new("board", vec!["alice".to_string(), "bob".to_string()]);
        assert_eq!(cmd.build().args().len(), 3);
        assert_eq!(cmd.parse_reply(Reply::Integer(2)).unwrap(), 2);
    }

    #[test]
    fn test_zscore_parses_decimal_payload() {
        let cmd = ZScoreCommand::new("board", "alice");
        assert_eq!(cmd.parse_reply(Reply::Nil).unwrap(), None);
        assert_eq!(
            cmd.parse_reply(Reply::Bulk(Bytes::from_static(b"2.75")))
                .unwrap(),
            Some(2.75)
        );
        assert!(matches!(
            cmd.parse_reply(Reply::Bulk(Bytes::from_static(b"not-a-number"))),
            Err(Error::Type(_))
        ));
    }

    #[test]
    fn test_zcard_command() {
        let cmd = ZCardCommand::new("board");
        assert_eq!(cmd.command_name(), "ZCARD");
        assert_eq!(cmd.parse_reply(Reply::Integer(4)).unwrap(), 4);
    }
}
