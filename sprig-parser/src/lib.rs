//! S-expression parser for sprig
//!
//! Source text is parsed by small composable parsers (see [`combinator`])
//! into a tree of [`Value`] nodes stored in a fixed-capacity
//! [`ValueArena`]:
//! - Zero-copy cursor over the input, with backtracking
//! - Nodes allocated only when a grammar rule commits
//! - Capacity, list length, token length and nesting depth are all bounded

pub mod combinator;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod lexical;
pub mod threaded;

pub use combinator::{Failure, Outcome, Parser};
pub use cursor::Cursor;
pub use error::{ErrorKind, ParseError};
pub use grammar::Grammar;
pub use threaded::{parse_threaded, parse_with_stack_size, ThreadedParserConfig};

use sprig_core::{ArenaError, Datum, Handle, Limits, Value, ValueArena};
use tracing::debug;

/// A parsed program together with the arena that owns it.
#[derive(Debug)]
pub struct Parsed {
    arena: ValueArena,
    roots: Vec<Handle<Value>>,
}

impl Parsed {
    pub fn arena(&self) -> &ValueArena {
        &self.arena
    }

    pub fn roots(&self) -> &[Handle<Value>] {
        &self.roots
    }

    /// Total number of live nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Copies every top-level value out of the arena.
    pub fn snapshot(&self) -> Result<Vec<Datum>, ArenaError> {
        self.roots
            .iter()
            .map(|root| self.arena.snapshot(root))
            .collect()
    }

    /// Prints every top-level value.
    pub fn render(&self) -> Result<Vec<String>, ArenaError> {
        self.roots
            .iter()
            .map(|root| self.arena.render(root))
            .collect()
    }

    pub fn into_parts(self) -> (ValueArena, Vec<Handle<Value>>) {
        (self.arena, self.roots)
    }
}

/// Parse a whole program with the default limits.
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    parse_with_limits(source, Limits::default())
}

/// Parse a whole program into a fresh arena sized by `limits`.
pub fn parse_with_limits(source: &str, limits: Limits) -> Result<Parsed, ParseError> {
    let mut arena = ValueArena::new(limits);
    let roots = parse_program(&mut arena, source)?;
    Ok(Parsed { arena, roots })
}

/// Parse exactly one value. Trailing whitespace and comments are allowed;
/// anything else is [`ParseError::TrailingInput`].
///
/// On error the arena is left as it was found.
pub fn parse_value(arena: &mut ValueArena, source: &str) -> Result<Handle<Value>, ParseError> {
    let mut grammar = Grammar::new(arena);
    let root = match grammar.value(Cursor::new(source)) {
        Ok((root, rest)) => {
            let rest = grammar::skip(rest);
            if !rest.is_empty() {
                grammar.arena().release_tree(root)?;
                return Err(ParseError::TrailingInput {
                    offset: rest.offset(),
                });
            }
            root
        }
        Err(Failure::Backtrack) => return Err(grammar.syntax_error(source)),
        Err(Failure::Fatal(err)) => return Err(err),
    };
    debug!(nodes = arena.len(), "parsed value");
    Ok(root)
}

/// Parse zero or more top-level values.
///
/// On error every value parsed so far is released, leaving the arena as it
/// was found.
pub fn parse_program(
    arena: &mut ValueArena,
    source: &str,
) -> Result<Vec<Handle<Value>>, ParseError> {
    let mut grammar = Grammar::new(arena);
    let mut roots = Vec::new();
    let mut cursor = Cursor::new(source);

    loop {
        cursor = grammar::skip(cursor);
        if cursor.is_empty() {
            break;
        }
        let failure = match grammar.value(cursor) {
            Ok((root, rest)) => {
                roots.push(root);
                cursor = rest;
                continue;
            }
            Err(Failure::Backtrack) => grammar.syntax_error(source),
            Err(Failure::Fatal(err)) => err,
        };
        grammar.arena().release_all(roots)?;
        return Err(failure);
    }

    debug!(roots = roots.len(), nodes = arena.len(), "parsed program");
    Ok(roots)
}
