//! Owned, arena-independent copy of a value tree

use super::printer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value tree detached from its arena.
///
/// Two trees compare equal when they have the same shape and leaves,
/// regardless of which slots the nodes occupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Datum {
    Atom(String),
    String(String),
    Integer(u64),
    Boolean(bool),
    List(Vec<Datum>),
    DottedList(Vec<Datum>),
}

impl Datum {
    pub fn atom(text: impl Into<String>) -> Self {
        Datum::Atom(text.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Datum::String(text.into())
    }

    pub fn int(n: u64) -> Self {
        Datum::Integer(n)
    }

    pub fn bool(b: bool) -> Self {
        Datum::Boolean(b)
    }

    pub fn list(items: impl IntoIterator<Item = Datum>) -> Self {
        Datum::List(items.into_iter().collect())
    }

    /// `head . tail`; `head` must not be empty for the result to be printable
    /// and re-readable.
    pub fn dotted(head: impl IntoIterator<Item = Datum>, tail: Datum) -> Self {
        let mut items: Vec<Datum> = head.into_iter().collect();
        items.push(tail);
        Datum::DottedList(items)
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        match self {
            Datum::List(items) | Datum::DottedList(items) => {
                1 + items.iter().map(Datum::node_count).sum::<usize>()
            }
            _ => 1,
        }
    }

    /// Nesting depth: 0 for a leaf, 1 for a list of leaves.
    pub fn depth(&self) -> usize {
        match self {
            Datum::List(items) | Datum::DottedList(items) => {
                1 + items.iter().map(Datum::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Atom(text) => printer::write_atom(f, text),
            Datum::String(text) => printer::write_string(f, text),
            Datum::Integer(n) => write!(f, "{}", n),
            Datum::Boolean(b) => printer::write_boolean(f, *b),
            Datum::List(items) => printer::write_sequence(f, items, false, |f, item| {
                write!(f, "{}", item)
            }),
            Datum::DottedList(items) => printer::write_sequence(f, items, true, |f, item| {
                write!(f, "{}", item)
            }),
        }
    }
}
