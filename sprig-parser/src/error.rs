//! Parser error types

use sprig_core::ArenaError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid syntax at byte offset {offset}")]
    Syntax { offset: usize },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Unexpected input after value at byte offset {offset}")]
    TrailingInput { offset: usize },

    #[error("Integer literal at byte offset {offset} does not fit in 64 bits: {text}")]
    IntegerOverflow { offset: usize, text: String },

    #[error("Maximum parsing depth exceeded: depth {depth} exceeds limit of {max_depth}")]
    MaxDepthExceeded { depth: usize, max_depth: usize },

    #[error("List at byte offset {offset} exceeds the maximum length of {max_len}")]
    ListTooLong { offset: usize, max_len: usize },

    #[error("Token at byte offset {offset} exceeds the maximum length of {max_len} bytes")]
    TextTooLong { offset: usize, max_len: usize },

    #[error(transparent)]
    Arena(#[from] ArenaError),

    #[error("Parser thread failed: {0}")]
    Thread(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    UnexpectedEof,
    TrailingInput,
    IntegerOverflow,
    MaxDepthExceeded,
    ListTooLong,
    TextTooLong,
    Arena,
    Thread,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::UnexpectedEof => ErrorKind::UnexpectedEof,
            ParseError::TrailingInput { .. } => ErrorKind::TrailingInput,
            ParseError::IntegerOverflow { .. } => ErrorKind::IntegerOverflow,
            ParseError::MaxDepthExceeded { .. } => ErrorKind::MaxDepthExceeded,
            ParseError::ListTooLong { .. } => ErrorKind::ListTooLong,
            ParseError::TextTooLong { .. } => ErrorKind::TextTooLong,
            ParseError::Arena(_) => ErrorKind::Arena,
            ParseError::Thread(_) => ErrorKind::Thread,
        }
    }

    /// True when a resource ceiling was hit, as opposed to the input being
    /// malformed or the arena being misused.
    pub fn is_resource_error(&self) -> bool {
        match self {
            ParseError::MaxDepthExceeded { .. }
            | ParseError::ListTooLong { .. }
            | ParseError::TextTooLong { .. } => true,
            ParseError::Arena(err) => err.is_exhaustion(),
            _ => false,
        }
    }

    /// Byte offset the error points at, when it has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { offset }
            | ParseError::TrailingInput { offset }
            | ParseError::IntegerOverflow { offset, .. }
            | ParseError::ListTooLong { offset, .. }
            | ParseError::TextTooLong { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
