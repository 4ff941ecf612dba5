//! The generic command object passed through the executors

use bytes::Bytes;

/// An opaque description of one operation: the command name, its encoded
/// arguments, and an optional routing key used to pick a connection.
///
/// A command object is immutable once built. Executors take it by reference
/// and never modify it; the pooled executor clones it to move a copy into its
/// dispatch unit.
///
/// # Examples
///
/// ```
/// use redrive_core::CommandObject;
///
/// let command = CommandObject::new("SET").key("user:1").arg("alice");
/// assert_eq!(command.name(), "SET");
/// assert_eq!(command.args().len(), 2);
/// assert_eq!(command.routing_key().map(|key| &key[..]), Some(&b"user:1"[..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandObject {
    name: String,
    args: Vec<Bytes>,
    routing_key: Option<Bytes>,
}

impl CommandObject {
    /// Create a command object with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            routing_key: None,
        }
    }

    /// Append an encoded argument
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<[u8]>) -> Self {
        self.args.push(Bytes::copy_from_slice(arg.as_ref()));
        self
    }

    /// Append a key argument.
    ///
    /// The first key also becomes the routing key; later keys are ordinary
    /// arguments.
    #[must_use]
    pub fn key(mut self, key: impl AsRef<[u8]>) -> Self {
        let key = Bytes::copy_from_slice(key.as_ref());
        if self.routing_key.is_none() {
            self.routing_key = Some(key.clone());
        }
        self.args.push(key);
        self
    }

    /// The command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The encoded arguments, in order
    pub fn args(&self) -> &[Bytes] {
        &self.args
    }

    /// The routing key, if any key argument was given
    pub fn routing_key(&self) -> Option<&Bytes> {
        self.routing_key.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_without_key_has_no_routing() {
        let command = CommandObject::new("PING");
        assert_eq!(command.name(), "PING");
        assert!(command.args().is_empty());
        assert!(command.routing_key().is_none());
    }

    #[test]
    fn test_first_key_becomes_routing_key() {
        let command = CommandObject::new("DEL").key("first").key("second");
        assert_eq!(command.args().len(), 2);
        assert_eq!(command.routing_key().map(|key| &key[..]), Some(&b"first"[..]));
    }

    #[test]
    fn test_args_keep_insertion_order() {
        let command = CommandObject::new("SET")
            .key("k")
            .arg("v")
            .arg("EX")
            .arg("60");

        let args: Vec<&[u8]> = command.args().iter().map(|arg| &arg[..]).collect();
        assert_eq!(args, vec![&b"k"[..], &b"v"[..], &b"EX"[..], &b"60"[..]]);
    }

    #[test]
    fn test_binary_arguments_survive_unchanged() {
        let command = CommandObject::new("SET").key([0u8, 159, 146, 150]).arg("x");
        assert_eq!(command.args()[0].as_ref(), &[0u8, 159, 146, 150]);
    }
}
