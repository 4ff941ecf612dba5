//! Hash command builders

use std::collections::HashMap;

use redrive_core::{CommandObject, Error, Reply, Result};

use super::Command;

/// HSET command - set one or more hash fields
#[derive(Debug, Clone)]
pub struct HSetCommand {
    key: String,
    fields: Vec<(String, String)>,
}

impl HSetCommand {
    /// Create a new HSET command with one field
    pub fn new(
        key: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            fields: vec![(field.into(), value.into())],
        }
    }

    /// Add another field to the same HSET
    pub fn field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }
}

impl Command for HSetCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "HSET"
    }

    fn build(&self) -> CommandObject {
        let mut command = CommandObject::new("HSET").key(&self.key);
        for (field, value) in &self.fields {
            command = command.arg(field).arg(value);
        }
        command
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

/// HGET command - get the value of a hash field
#[derive(Debug, Clone)]
pub struct HGetCommand {
    key: String,
    field: String,
}

impl HGetCommand {
    /// Create a new HGET command
    pub fn new(key: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            field: field.into(),
        }
    }
}

impl Command for HGetCommand {
    type Output = Option<String>;

    fn command_name(&self) -> &str {
        "HGET"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("HGET").key(&self.key).arg(&self.field)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        if reply.is_nil() {
            Ok(None)
        } else {
            Ok(Some(reply.as_string()?))
        }
    }
}

/// HDEL command - delete one or more hash fields
#[derive(Debug, Clone)]
pub struct HDelCommand {
    key: String,
    fields: Vec<String>,
}

impl HDelCommand {
    /// Create a new HDEL command
    pub fn new(key: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            key: key.into(),
            fields,
        }
    }
}

impl Command for HDelCommand {
    type Output = i64;

    fn command_name(&self) -> &str {
        "HDEL"
    }

    fn build(&self) -> CommandObject {
        let mut command = CommandObject::new("HDEL").key(&self.key);
        for field in &self.fields {
            command = command.arg(field);
        }
        command
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        reply.as_int()
    }
}

/// HGETALL command - get all fields and values of a hash
#[derive(Debug, Clone)]
pub struct HGetAllCommand {
    key: String,
}

impl HGetAllCommand {
    /// Create a new HGETALL command
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Command for HGetAllCommand {
    type Output = HashMap<String, String>;

    fn command_name(&self) -> &str {
        "HGETALL"
    }

    fn build(&self) -> CommandObject {
        CommandObject::new("HGETALL").key(&self.key)
    }

    fn parse_reply(&self, reply: Reply) -> Result<Self::Output> {
        let items = reply.as_array()?;
        if items.len() % 2 != 0 {
            return Err(Error::Type(
                "HGETALL reply has a field without a value".to_string(),
            ));
        }

        let mut map = HashMap::with_capacity(items.len() / 2);
        for pair in items.chunks(2) {
            map.insert(pair[0].as_string()?, pair[1].as_string()?);
        }
        Ok(map)
    }
}
