//! Error types for parsing, tree manipulation and typed access
//!
//! One flat enum for the whole crate. Parse errors carry the byte offset
//! into the input where the problem was detected.

use std::path::PathBuf;

use thiserror::Error;

use crate::dom::NodeKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed tag, comment, CDATA section, declaration or entity reference
    #[error("lex error at byte {position}: {message}")]
    Lex { message: String, position: usize },

    /// Mismatched or unterminated element tags
    #[error("structure error at byte {position}: {message}")]
    Structure { message: String, position: usize },

    /// Inserting a node that already has an owner, or using a handle
    /// that no longer refers to a live node
    #[error("ownership error: {0}")]
    Ownership(String),

    /// The node a cursor referred to was removed from its container
    #[error("cursor is stale: its node was removed from the container")]
    StaleCursor,

    #[error("wrong node kind: expected {expected}, got {actual}")]
    WrongKind { expected: NodeKind, actual: NodeKind },

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("element <{tag}> is not a value element")]
    NotAValueElement { tag: String },

    #[error("cannot convert {value:?} to {target}: {reason}")]
    Conversion {
        value: String,
        target: &'static str,
        reason: String,
    },

    #[error("required {what} {name:?} not found")]
    NotFound { what: &'static str, name: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn lex(message: impl Into<String>, position: usize) -> Self {
        Error::Lex {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn structure(message: impl Into<String>, position: usize) -> Self {
        Error::Structure {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn conversion(
        value: &str,
        target: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Error::Conversion {
            value: value.to_string(),
            target,
            reason: reason.into(),
        }
    }

    /// Byte offset of a parse error, if this is one
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Lex { position, .. } | Error::Structure { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lex() {
        let err = Error::lex("unterminated comment", 12);
        assert_eq!(err.to_string(), "lex error at byte 12: unterminated comment");
        assert_eq!(err.position(), Some(12));
    }

    #[test]
    fn test_display_not_found() {
        let err = Error::NotFound {
            what: "attribute",
            name: "mass".to_string(),
        };
        assert_eq!(err.to_string(), "required attribute \"mass\" not found");
        assert_eq!(err.position(), None);
    }
}
