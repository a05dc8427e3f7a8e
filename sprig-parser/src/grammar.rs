//! S-expression grammar over the value arena
//!
//! The grammar is the only part of the parser that allocates. Leaves are
//! allocated once their token has matched. A list reserves its own slot on
//! `(`, allocates children as they complete and populates the reservation
//! on `)`. Whenever a list fails, its reservation and every child already
//! allocated are released before the failure propagates, so a failed parse
//! leaves the arena as it found it.
//!
//! Each nested list checks the remaining native stack and grows it when
//! short, so any `max_depth` is reported as
//! [`ParseError::MaxDepthExceeded`] rather than overflowing the caller's
//! thread.

use sprig_core::{Handle, Limits, Value, ValueArena};
use tracing::{trace, warn};

use crate::combinator::*;
use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::lexical::{
    atom, atom_char, boolean, digits, skip_trivia, string_literal, unsigned_integer,
    ATOM_DELIMITERS,
};

/// Remaining stack below which a nested list switches to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated for deep nesting.
const STACK_SEGMENT: usize = 1024 * 1024;

/// A matched token, before it is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Atom(&'a str),
    String(&'a str),
    Integer(u64),
    Boolean(bool),
}

/// Recursive-descent builder for [`Value`] trees.
pub struct Grammar<'s> {
    arena: &'s mut ValueArena,
    limits: Limits,
    depth: usize,
    farthest: usize,
}

impl<'s> Grammar<'s> {
    /// Uses the limits the arena was created with.
    pub fn new(arena: &'s mut ValueArena) -> Self {
        let limits = *arena.limits();
        Self {
            arena,
            limits,
            depth: 0,
            farthest: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_depth = max_depth;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn arena(&mut self) -> &mut ValueArena {
        &mut *self.arena
    }

    /// Current list nesting depth. Zero between top-level values.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The farthest byte offset at which any rule backtracked so far.
    pub fn farthest_failure(&self) -> usize {
        self.farthest
    }

    /// Turns a backtrack at the top level into an error, using the farthest
    /// failure as the location.
    pub fn syntax_error(&self, source: &str) -> ParseError {
        if self.farthest >= source.len() {
            ParseError::UnexpectedEof
        } else {
            ParseError::Syntax {
                offset: self.farthest,
            }
        }
    }

    /// The top-level value rule: skips leading whitespace and comments, then
    /// tries a string, an integer, a list, a boolean and finally an atom.
    pub fn value<'a>(&mut self, input: Cursor<'a>) -> Outcome<'a, Handle<Value>> {
        let start = skip(input);
        let result = self.term(start);
        if matches!(result, Err(Failure::Backtrack)) {
            self.note_failure(start);
        }
        result
    }

    fn term<'a>(&mut self, start: Cursor<'a>) -> Outcome<'a, Handle<Value>> {
        match alternative(map(string_literal(), Token::String), integer()).parse(start) {
            Ok((token, rest)) => return self.leaf(token, start, rest),
            Err(Failure::Backtrack) => {
                if start.peek() == Some('"') {
                    // Only an unterminated string gets here.
                    self.note_failure(start.advance(start.len()));
                }
            }
            Err(fatal) => return Err(fatal),
        }

        match self.list(start) {
            Err(Failure::Backtrack) => {}
            other => return other,
        }

        let (token, rest) =
            alternative(map(boolean(), Token::Boolean), map(atom(), Token::Atom)).parse(start)?;
        self.leaf(token, start, rest)
    }

    fn leaf<'a>(
        &mut self,
        token: Token<'a>,
        start: Cursor<'a>,
        rest: Cursor<'a>,
    ) -> Outcome<'a, Handle<Value>> {
        let value = match token {
            Token::Atom(text) => Value::Atom(self.text(text, start)?),
            Token::String(text) => Value::String(self.text(text, start)?),
            Token::Integer(n) => Value::Integer(n),
            Token::Boolean(b) => Value::Boolean(b),
        };
        let handle = self.arena.allocate(value).map_err(ParseError::from)?;
        trace!(offset = start.offset(), slot = %handle.slot_id(), ?token, "leaf");
        Ok((handle, rest))
    }

    fn text(&self, text: &str, start: Cursor<'_>) -> Result<String, ParseError> {
        let max_len = self.limits.max_text_len;
        if text.len() > max_len {
            warn!(offset = start.offset(), len = text.len(), max_len, "token too long");
            return Err(ParseError::TextTooLong {
                offset: start.offset(),
                max_len,
            });
        }
        Ok(text.to_string())
    }

    fn list<'a>(&mut self, start: Cursor<'a>) -> Outcome<'a, Handle<Value>> {
        let (_, body) = character('(').parse(start)?;
        self.enter_recursion()?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
            self.list_node(start, body)
        });
        self.exit_recursion();
        result
    }

    fn list_node<'a>(&mut self, start: Cursor<'a>, body: Cursor<'a>) -> Outcome<'a, Handle<Value>> {
        let mut node = self.arena.reserve().map_err(ParseError::from)?;
        let mut children = Vec::new();

        match self.elements(body, &mut children) {
            Ok((dotted, rest)) => {
                let len = children.len();
                let value = if dotted {
                    Value::DottedList(children)
                } else {
                    Value::List(children)
                };
                self.arena.populate(&mut node, value).map_err(ParseError::from)?;
                trace!(offset = start.offset(), slot = %node.slot_id(), len, dotted, "list");
                Ok((node, rest))
            }
            Err(failure) => {
                let released = self.arena.release_all(children).map_err(ParseError::from)?;
                self.arena.remove(node).map_err(ParseError::from)?;
                trace!(offset = start.offset(), released, "abandoned list");
                Err(failure)
            }
        }
    }

    /// Parses list contents up to and including `)`, pushing each child as
    /// it completes. Returns whether the list was dotted.
    fn elements<'a>(
        &mut self,
        body: Cursor<'a>,
        children: &mut Vec<Handle<Value>>,
    ) -> Outcome<'a, bool> {
        let max_len = self.limits.max_list_len;
        let mut count = 0usize;

        let (_, rest) = separated_by_value(
            |input: Cursor<'a>| -> Outcome<'a, Handle<Value>> {
                if at_list_end(input) {
                    return Err(Failure::Backtrack);
                }
                if count == max_len {
                    return Err(too_long(input, max_len));
                }
                let child = self.value(input)?;
                count += 1;
                Ok(child)
            },
            skip_trivia(),
            || (),
            |(), child| children.push(child),
        )
        .parse(body)?;

        let mut cursor = rest;
        let mut dotted = false;
        if !children.is_empty() {
            if let Ok((_, after_dot)) = dot_separator().parse(skip(cursor)) {
                if children.len() == max_len {
                    return Err(too_long(after_dot, max_len));
                }
                let (tail, after_tail) = self.value(after_dot)?;
                children.push(tail);
                dotted = true;
                cursor = after_tail;
            }
        }

        let close = skip(cursor);
        match character(')').parse(close) {
            Ok((_, rest)) => Ok((dotted, rest)),
            Err(failure) => {
                self.note_failure(close);
                Err(failure)
            }
        }
    }

    /// Increment depth when entering a list, checking against the limit.
    fn enter_recursion(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.limits.max_depth {
            warn!(depth = self.depth, max_depth = self.limits.max_depth, "nesting too deep");
            return Err(ParseError::MaxDepthExceeded {
                depth: self.depth,
                max_depth: self.limits.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn note_failure(&mut self, at: Cursor<'_>) {
        self.farthest = self.farthest.max(at.offset());
    }
}

/// Advances past whitespace and comments.
pub(crate) fn skip(input: Cursor<'_>) -> Cursor<'_> {
    match skip_trivia().parse(input) {
        Ok((_, rest)) => rest,
        Err(_) => input,
    }
}

/// A digit run that ends at a delimiter. Digits followed by atom characters
/// are left for the atom rule; a run too large for `u64` is fatal.
fn integer<'a>() -> impl Parser<'a, Token<'a>> {
    let mut token = sequence_left(digits(), not_followed_by(atom_char()));
    move |input: Cursor<'a>| -> Outcome<'a, Token<'a>> {
        let (text, rest) = token.parse(input)?;
        match unsigned_integer().parse(input) {
            Ok((n, _)) => Ok((Token::Integer(n), rest)),
            Err(_) => Err(Failure::Fatal(ParseError::IntegerOverflow {
                offset: input.offset(),
                text: text.to_string(),
            })),
        }
    }
}

/// The `.` of a dotted list: a lone dot followed by any atom delimiter
/// other than `)`. `(a .)` is a list ending in the atom `.`.
fn dot_separator<'a>() -> impl Parser<'a, ()> {
    map(
        sequence_left(
            character('.'),
            peek(satisfy(|c| c != ')' && ATOM_DELIMITERS.contains(c))),
        ),
        |_| (),
    )
}

fn at_list_end(input: Cursor<'_>) -> bool {
    let rest = skip(input);
    rest.peek() == Some(')') || dot_separator().parse(rest).is_ok()
}

fn too_long(at: Cursor<'_>, max_len: usize) -> Failure {
    warn!(offset = at.offset(), max_len, "list too long");
    Failure::Fatal(ParseError::ListTooLong {
        offset: at.offset(),
        max_len,
    })
}

#[cfg(test)]
#[path = "grammar_tests.rs"]
mod tests;
