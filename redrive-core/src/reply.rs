//! Typed reply values returned by command execution

use crate::error::{Error, Result};
use bytes::Bytes;

/// Decode a raw byte payload as text, one character per byte.
///
/// Every byte maps to the `char` with the same code point, so the conversion
/// is total: arbitrary binary payloads round-trip through `String` without
/// loss or replacement characters.
pub fn latin1_string(payload: &[u8]) -> String {
    payload.iter().map(|&byte| char::from(byte)).collect()
}

/// A decoded command reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Absent value
    Nil,
    /// Short status string, e.g. OK or PONG
    Simple(String),
    /// Signed integer
    Integer(i64),
    /// Raw byte payload
    Bulk(Bytes),
    /// Ordered collection of replies
    Array(Vec<Reply>),
}

impl Reply {
    /// Convert to a string if possible
    pub fn as_string(&self) -> Result<String> {
        match self {
            Reply::Simple(s) => Ok(s.clone()),
            Reply::Bulk(b) => Ok(latin1_string(b)),
            Reply::Nil => Err(Error::Type("reply is nil".to_string())),
            _ => Err(Error::Type(format!("cannot convert {:?} to string", self))),
        }
    }

    /// Convert to an integer if possible
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Reply::Integer(i) => Ok(*i),
            Reply::Bulk(b) => latin1_string(b)
                .parse::<i64>()
                .map_err(|e| Error::Type(format!("cannot parse integer: {}", e))),
            _ => Err(Error::Type(format!("cannot convert {:?} to integer", self))),
        }
    }

    /// Convert to bytes if possible
    pub fn as_bytes(&self) -> Result<Bytes> {
        match self {
            Reply::Bulk(b) => Ok(b.clone()),
            Reply::Simple(s) => Ok(Bytes::from(s.clone().into_bytes())),
            Reply::Nil => Err(Error::Type("reply is nil".to_string())),
            _ => Err(Error::Type(format!("cannot convert {:?} to bytes", self))),
        }
    }

    /// Convert to an array if possible
    pub fn as_array(&self) -> Result<Vec<Reply>> {
        match self {
            Reply::Array(items) => Ok(items.clone()),
            _ => Err(Error::Type(format!("cannot convert {:?} to array", self))),
        }
    }

    /// Check if this is the absent value
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// Check if this is the OK status
    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Simple(s) if s == "OK")
    }
}

impl From<String> for Reply {
    fn from(s: String) -> Self {
        Reply::Bulk(Bytes::from(s.into_bytes()))
    }
}

impl From<&str> for Reply {
    fn from(s: &str) -> Self {
        Reply::Bulk(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<i64> for Reply {
    fn from(i: i64) -> Self {
        Reply::Integer(i)
    }
}

impl From<Vec<u8>> for Reply {
    fn from(b: Vec<u8>) -> Self {
        Reply::Bulk(Bytes::from(b))
    }
}

impl From<Bytes> for Reply {
    fn from(b: Bytes) -> Self {
        Reply::Bulk(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_decodes_every_byte() {
        assert_eq!(latin1_string(b"plain"), "plain");
        assert_eq!(latin1_string(&[0x63, 0xE9]), "c\u{e9}");
        assert_eq!(latin1_string(&[0x00, 0xFF]), "\u{0}\u{ff}");
    }

    #[test]
    fn test_as_string() {
        let reply = Reply::Simple("OK".to_string());
        assert_eq!(reply.as_string().unwrap(), "OK");

        let reply = Reply::Bulk(Bytes::from_static(&[0x63, 0xE9]));
        assert_eq!(reply.as_string().unwrap(), "c\u{e9}");

        assert!(Reply::Nil.as_string().is_err());
        assert!(Reply::Integer(1).as_string().is_err());
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Reply::Integer(42).as_int().unwrap(), 42);
        assert_eq!(Reply::Bulk(Bytes::from_static(b"123")).as_int().unwrap(), 123);
        assert!(Reply::Bulk(Bytes::from_static(b"abc")).as_int().is_err());
        assert!(Reply::Nil.as_int().is_err());
    }

    #[test]
    fn test_as_bytes() {
        let reply = Reply::Bulk(Bytes::from_static(b"raw"));
        assert_eq!(reply.as_bytes().unwrap(), Bytes::from_static(b"raw"));

        let reply = Reply::Simple("OK".to_string());
        assert_eq!(reply.as_bytes().unwrap(), Bytes::from_static(b"OK"));

        assert!(Reply::Nil.as_bytes().is_err());
    }

    #[test]
    fn test_as_array() {
        let reply = Reply::Array(vec![Reply::Integer(1), Reply::Nil]);
        assert_eq!(reply.as_array().unwrap().len(), 2);
        assert!(Reply::Integer(1).as_array().is_err());
    }

    #[test]
    fn test_predicates() {
        assert!(Reply::Nil.is_nil());
        assert!(!Reply::Integer(0).is_nil());

        assert!(Reply::Simple("OK".to_string()).is_ok());
        assert!(!Reply::Simple("PONG".to_string()).is_ok());
        assert!(!Reply::Bulk(Bytes::from_static(b"OK")).is_ok());
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Reply::from("x"), Reply::Bulk(Bytes::from_static(b"x")));
        assert_eq!(Reply::from(7i64), Reply::Integer(7));
        assert_eq!(
            Reply::from(vec![1u8, 2]),
            Reply::Bulk(Bytes::from_static(&[1, 2]))
        );
    }
}
