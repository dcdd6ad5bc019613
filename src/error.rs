//! Error taxonomy for the conversion pipeline.
//!
//! Errors are file-scoped: a failed conversion aborts that file only,
//! and the batch driver keeps going with the remaining files.

use std::fmt;
use std::io;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Everything that can go wrong while converting one instance file.
#[derive(Debug)]
pub enum ConvertError {
    /// Header arity, section length, field arity/type, or time-window
    /// ordering does not match the dialect's fixed expectations.
    MalformedInstance {
        /// 1-based line number in the source file, when known.
        line: usize,
        reason: String,
    },
    /// A task record (or the designated start node) references a node
    /// identifier absent from the parsed point map.
    UnresolvedNodeReference { id: u64 },
    /// Source file unreadable or destination unwritable.
    Io(io::Error),
}

impl ConvertError {
    /// Shorthand used by the parsers.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ConvertError::MalformedInstance {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::MalformedInstance { line, reason } => {
                write!(f, "malformed instance (line {}): {}", line, reason)
            }
            ConvertError::UnresolvedNodeReference { id } => {
                write!(f, "task references node id {} which is not in the node table", id)
            }
            ConvertError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConvertError {
    fn from(e: io::Error) -> Self {
        ConvertError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line() {
        let err = ConvertError::malformed(7, "expected 6 fields, found 4");
        assert_eq!(
            err.to_string(),
            "malformed instance (line 7): expected 6 fields, found 4"
        );
    }

    #[test]
    fn test_unresolved_reference_display() {
        let err = ConvertError::UnresolvedNodeReference { id: 42 };
        assert!(err.to_string().contains("42"));
    }
}
