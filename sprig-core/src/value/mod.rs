//! Syntax tree value representation

pub mod datum;
pub mod printer;
pub mod store;

pub use datum::Datum;
pub use store::ValueArena;

use crate::arena::Handle;
use std::fmt;

/// One node of the syntax tree.
///
/// Children of `List` and `DottedList` are arena handles, each owned by
/// exactly one parent. The last child of a `DottedList` is its tail.
#[derive(Debug, Default)]
pub enum Value {
    /// Sentinel for a slot whose node has not been built yet
    #[default]
    Unassigned,

    /// Bare token, e.g. an identifier or operator
    Atom(String),

    /// Body of a quoted string, without the quotes
    String(String),

    Integer(u64),

    Boolean(bool),

    List(Vec<Handle<Value>>),

    /// `(a b . c)`: at least two children, the last one being the tail
    DottedList(Vec<Handle<Value>>),
}

/// Payload-free discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Unassigned,
    Atom,
    String,
    Integer,
    Boolean,
    List,
    DottedList,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Unassigned => ValueKind::Unassigned,
            Value::Atom(_) => ValueKind::Atom,
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::List(_) => ValueKind::List,
            Value::DottedList(_) => ValueKind::DottedList,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Value::Atom(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_dotted_list(&self) -> bool {
        matches!(self, Value::DottedList(_))
    }

    pub fn is_assigned(&self) -> bool {
        !matches!(self, Value::Unassigned)
    }

    /// Text of an atom or string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Atom(text) | Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Child handles of a list or dotted list; empty for leaves.
    pub fn children(&self) -> &[Handle<Value>] {
        match self {
            Value::List(items) | Value::DottedList(items) => items,
            _ => &[],
        }
    }

    /// Removes and returns the child handles, leaving an empty sequence.
    pub fn take_children(&mut self) -> Vec<Handle<Value>> {
        match self {
            Value::List(items) | Value::DottedList(items) => std::mem::take(items),
            _ => Vec::new(),
        }
    }
}

impl ValueKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Unassigned => "unassigned",
            ValueKind::Atom => "atom",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Boolean => "boolean",
            ValueKind::List => "list",
            ValueKind::DottedList => "dotted-list",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
#[path = "../value_tests.rs"]
mod tests;
