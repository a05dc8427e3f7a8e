//! Parser combinator engine
//!
//! A parser is anything that turns a [`Cursor`] into an [`Outcome`]: either a
//! value plus the remaining input, or a [`Failure`]. Plain closures of the
//! right shape are parsers, so every combinator here is a function returning
//! `impl Parser`.
//!
//! Failures come in two strengths. [`Failure::Backtrack`] means "this branch
//! does not match here" and lets [`alternative`] and the repetition
//! combinators try something else from the same position. [`Failure::Fatal`]
//! carries a [`ParseError`] that must abort the whole parse; no combinator
//! retries past it.
//!
//! None of these parsers touch any state besides the cursor they are given,
//! so re-running one from a saved cursor is always safe.

use crate::cursor::Cursor;
use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Recoverable: the caller may try another branch from the same input.
    Backtrack,
    /// Unrecoverable: propagate without retrying.
    Fatal(ParseError),
}

impl Failure {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Failure::Fatal(_))
    }
}

impl From<ParseError> for Failure {
    fn from(err: ParseError) -> Self {
        Failure::Fatal(err)
    }
}

pub type Outcome<'a, T> = Result<(T, Cursor<'a>), Failure>;

/// Anything that can consume a prefix of a [`Cursor`].
pub trait Parser<'a, O> {
    fn parse(&mut self, input: Cursor<'a>) -> Outcome<'a, O>;

    fn map<B, F>(self, f: F) -> impl Parser<'a, B>
    where
        Self: Sized,
        F: FnMut(O) -> B,
    {
        map(self, f)
    }

    fn bind<B, F, Q>(self, f: F) -> impl Parser<'a, B>
    where
        Self: Sized,
        F: FnMut(O, Cursor<'a>) -> Q,
        Q: Parser<'a, B>,
    {
        bind(self, f)
    }

    fn or<P>(self, other: P) -> impl Parser<'a, O>
    where
        Self: Sized,
        P: Parser<'a, O>,
    {
        alternative(self, other)
    }

    fn accumulate<B, C, P, F>(self, other: P, f: F) -> impl Parser<'a, C>
    where
        Self: Sized,
        P: Parser<'a, B>,
        F: FnMut(O, B) -> C,
    {
        accumulate(self, other, f)
    }

    fn then_ignore<B, P>(self, other: P) -> impl Parser<'a, O>
    where
        Self: Sized,
        P: Parser<'a, B>,
    {
        sequence_left(self, other)
    }

    fn ignore_then<B, P>(self, other: P) -> impl Parser<'a, B>
    where
        Self: Sized,
        P: Parser<'a, B>,
    {
        sequence_right(self, other)
    }
}

impl<'a, O, F> Parser<'a, O> for F
where
    F: FnMut(Cursor<'a>) -> Outcome<'a, O>,
{
    fn parse(&mut self, input: Cursor<'a>) -> Outcome<'a, O> {
        self(input)
    }
}

// ===== Primitives =====

/// Consumes one character matching `predicate`.
pub fn satisfy<'a, F>(mut predicate: F) -> impl Parser<'a, char>
where
    F: FnMut(char) -> bool,
{
    move |input: Cursor<'a>| -> Outcome<'a, char> {
        match input.next_char() {
            Some((c, rest)) if predicate(c) => Ok((c, rest)),
            _ => Err(Failure::Backtrack),
        }
    }
}

/// Consumes exactly `expected`.
pub fn character<'a>(expected: char) -> impl Parser<'a, char> {
    satisfy(move |c| c == expected)
}

/// Consumes one character that appears in `set`.
pub fn one_of<'a>(set: &'static str) -> impl Parser<'a, char> {
    satisfy(move |c| set.contains(c))
}

/// Consumes one character that does not appear in `set`. Fails at end of
/// input.
pub fn none_of<'a>(set: &'static str) -> impl Parser<'a, char> {
    satisfy(move |c| !set.contains(c))
}

/// Consumes `text` verbatim.
pub fn literal<'a>(text: &'static str) -> impl Parser<'a, &'a str> {
    move |input: Cursor<'a>| -> Outcome<'a, &'a str> {
        if input.starts_with(text) {
            let rest = input.advance(text.len());
            Ok((input.consumed_until(rest), rest))
        } else {
            Err(Failure::Backtrack)
        }
    }
}

/// Succeeds without consuming only when no input remains.
pub fn end_of_input<'a>() -> impl Parser<'a, ()> {
    move |input: Cursor<'a>| -> Outcome<'a, ()> {
        if input.is_empty() {
            Ok(((), input))
        } else {
            Err(Failure::Backtrack)
        }
    }
}

/// Always succeeds with a copy of `value`, consuming nothing.
pub fn pure<'a, O: Clone>(value: O) -> impl Parser<'a, O> {
    move |input: Cursor<'a>| -> Outcome<'a, O> { Ok((value.clone(), input)) }
}

/// Always succeeds with `f` applied to the input, consuming nothing.
pub fn lift<'a, O, F>(mut f: F) -> impl Parser<'a, O>
where
    F: FnMut(Cursor<'a>) -> O,
{
    move |input: Cursor<'a>| -> Outcome<'a, O> { Ok((f(input), input)) }
}

/// Always fails, recoverably.
pub fn fail<'a, O>() -> impl Parser<'a, O> {
    move |_input: Cursor<'a>| -> Outcome<'a, O> { Err(Failure::Backtrack) }
}

// ===== Transformation and sequencing =====

pub fn map<'a, A, B, P, F>(mut parser: P, mut f: F) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    F: FnMut(A) -> B,
{
    move |input: Cursor<'a>| -> Outcome<'a, B> {
        let (value, rest) = parser.parse(input)?;
        Ok((f(value), rest))
    }
}

/// Runs `parser`, then hands its value and the remaining input to `f` and
/// runs whichever parser `f` returns on that remainder.
pub fn bind<'a, A, B, P, F, Q>(mut parser: P, mut f: F) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    F: FnMut(A, Cursor<'a>) -> Q,
    Q: Parser<'a, B>,
{
    move |input: Cursor<'a>| -> Outcome<'a, B> {
        let (value, rest) = parser.parse(input)?;
        f(value, rest).parse(rest)
    }
}

/// Tries `first`; on a recoverable failure tries `second` from the same
/// input.
pub fn alternative<'a, O, P, Q>(mut first: P, mut second: Q) -> impl Parser<'a, O>
where
    P: Parser<'a, O>,
    Q: Parser<'a, O>,
{
    move |input: Cursor<'a>| -> Outcome<'a, O> {
        match first.parse(input) {
            Err(Failure::Backtrack) => second.parse(input),
            other => other,
        }
    }
}

/// Runs both in order and combines their values with `f`.
pub fn accumulate<'a, A, B, C, P, Q, F>(
    mut first: P,
    mut second: Q,
    mut f: F,
) -> impl Parser<'a, C>
where
    P: Parser<'a, A>,
    Q: Parser<'a, B>,
    F: FnMut(A, B) -> C,
{
    move |input: Cursor<'a>| -> Outcome<'a, C> {
        let (a, rest) = first.parse(input)?;
        let (b, rest) = second.parse(rest)?;
        Ok((f(a, b), rest))
    }
}

/// Runs both in order and keeps the first value.
pub fn sequence_left<'a, A, B, P, Q>(mut first: P, mut second: Q) -> impl Parser<'a, A>
where
    P: Parser<'a, A>,
    Q: Parser<'a, B>,
{
    move |input: Cursor<'a>| -> Outcome<'a, A> {
        let (value, rest) = first.parse(input)?;
        let (_, rest) = second.parse(rest)?;
        Ok((value, rest))
    }
}

/// Runs both in order and keeps the second value.
pub fn sequence_right<'a, A, B, P, Q>(mut first: P, mut second: Q) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    Q: Parser<'a, B>,
{
    move |input: Cursor<'a>| -> Outcome<'a, B> {
        let (_, rest) = first.parse(input)?;
        second.parse(rest)
    }
}

/// `open`, then `inner`, then `close`; keeps the inner value.
pub fn delimited<'a, A, O, B, L, P, R>(open: L, inner: P, close: R) -> impl Parser<'a, O>
where
    L: Parser<'a, A>,
    P: Parser<'a, O>,
    R: Parser<'a, B>,
{
    sequence_left(sequence_right(open, inner), close)
}

// ===== Optional and repetition =====

/// Runs `parser` once if it matches, otherwise yields `O::default()` without
/// consuming.
pub fn zero_or_one<'a, O, P>(parser: P) -> impl Parser<'a, O>
where
    O: Default,
    P: Parser<'a, O>,
{
    option_with(parser, O::default)
}

/// Like [`zero_or_one`] with an explicit fallback value.
pub fn option<'a, O, P>(parser: P, default: O) -> impl Parser<'a, O>
where
    O: Clone,
    P: Parser<'a, O>,
{
    option_with(parser, move || default.clone())
}

fn option_with<'a, O, P, D>(mut parser: P, mut default: D) -> impl Parser<'a, O>
where
    P: Parser<'a, O>,
    D: FnMut() -> O,
{
    move |input: Cursor<'a>| -> Outcome<'a, O> {
        match parser.parse(input) {
            Err(Failure::Backtrack) => Ok((default(), input)),
            other => other,
        }
    }
}

/// Applies `parser` until it stops matching, folding each value into an
/// accumulator built by `seed`. Zero matches succeed with the seed.
///
/// A match that consumes nothing ends the repetition after being folded.
pub fn many<'a, O, A, P, S, F>(mut parser: P, mut seed: S, mut fold: F) -> impl Parser<'a, A>
where
    P: Parser<'a, O>,
    S: FnMut() -> A,
    F: FnMut(A, O) -> A,
{
    move |input: Cursor<'a>| -> Outcome<'a, A> {
        fold_while(&mut parser, input, seed(), &mut fold)
    }
}

/// Like [`many`] but at least one match is required.
pub fn many1<'a, O, A, P, S, F>(mut parser: P, mut seed: S, mut fold: F) -> impl Parser<'a, A>
where
    P: Parser<'a, O>,
    S: FnMut() -> A,
    F: FnMut(A, O) -> A,
{
    move |input: Cursor<'a>| -> Outcome<'a, A> {
        let (first, rest) = parser.parse(input)?;
        let acc = fold(seed(), first);
        if rest.offset() == input.offset() {
            return Ok((acc, rest));
        }
        fold_while(&mut parser, rest, acc, &mut fold)
    }
}

/// Exactly `count` matches or nothing: on a shortfall the whole parser fails
/// and consumes nothing.
pub fn exactly_n<'a, O, A, P, S, F>(
    mut parser: P,
    count: usize,
    mut seed: S,
    mut fold: F,
) -> impl Parser<'a, A>
where
    P: Parser<'a, O>,
    S: FnMut() -> A,
    F: FnMut(A, O) -> A,
{
    move |input: Cursor<'a>| -> Outcome<'a, A> {
        let mut acc = seed();
        let mut cursor = input;
        for _ in 0..count {
            let (value, rest) = parser.parse(cursor)?;
            acc = fold(acc, value);
            cursor = rest;
        }
        Ok((acc, cursor))
    }
}

/// One or more `item`s separated by `separator`, combined pairwise with
/// `fold`. A trailing separator is left unconsumed.
pub fn separated_by<'a, O, B, P, Q, F>(
    mut item: P,
    mut separator: Q,
    mut fold: F,
) -> impl Parser<'a, O>
where
    P: Parser<'a, O>,
    Q: Parser<'a, B>,
    F: FnMut(O, O) -> O,
{
    move |input: Cursor<'a>| -> Outcome<'a, O> {
        let (first, rest) = item.parse(input)?;
        let mut tail = sequence_right(
            |i: Cursor<'a>| separator.parse(i),
            |i: Cursor<'a>| item.parse(i),
        );
        fold_while(&mut tail, rest, first, &mut fold)
    }
}

/// Zero or more `item`s separated by `separator`, folded into an
/// accumulator built by `seed`.
pub fn separated_by_value<'a, O, A, B, P, Q, S, F>(
    mut item: P,
    mut separator: Q,
    mut seed: S,
    mut fold: F,
) -> impl Parser<'a, A>
where
    P: Parser<'a, O>,
    Q: Parser<'a, B>,
    S: FnMut() -> A,
    F: FnMut(A, O) -> A,
{
    move |input: Cursor<'a>| -> Outcome<'a, A> {
        let (first, rest) = match item.parse(input) {
            Ok(matched) => matched,
            Err(Failure::Backtrack) => return Ok((seed(), input)),
            Err(fatal) => return Err(fatal),
        };
        let acc = fold(seed(), first);
        let mut tail = sequence_right(
            |i: Cursor<'a>| separator.parse(i),
            |i: Cursor<'a>| item.parse(i),
        );
        fold_while(&mut tail, rest, acc, &mut fold)
    }
}

fn fold_while<'a, O, A, P, F>(
    parser: &mut P,
    mut input: Cursor<'a>,
    mut acc: A,
    fold: &mut F,
) -> Outcome<'a, A>
where
    P: Parser<'a, O>,
    F: FnMut(A, O) -> A,
{
    loop {
        match parser.parse(input) {
            Ok((value, rest)) => {
                acc = fold(acc, value);
                if rest.offset() == input.offset() {
                    return Ok((acc, rest));
                }
                input = rest;
            }
            Err(Failure::Backtrack) => return Ok((acc, input)),
            Err(fatal) => return Err(fatal),
        }
    }
}

// ===== Lookahead and recognition =====

/// Runs `parser` and yields the exact text it consumed instead of its value.
pub fn recognize<'a, O, P>(mut parser: P) -> impl Parser<'a, &'a str>
where
    P: Parser<'a, O>,
{
    move |input: Cursor<'a>| -> Outcome<'a, &'a str> {
        let (_, rest) = parser.parse(input)?;
        Ok((input.consumed_until(rest), rest))
    }
}

/// Succeeds without consuming when `parser` would fail here.
pub fn not_followed_by<'a, O, P>(mut parser: P) -> impl Parser<'a, ()>
where
    P: Parser<'a, O>,
{
    move |input: Cursor<'a>| -> Outcome<'a, ()> {
        match parser.parse(input) {
            Ok(_) => Err(Failure::Backtrack),
            Err(Failure::Backtrack) => Ok(((), input)),
            Err(fatal) => Err(fatal),
        }
    }
}

/// Runs `parser` without consuming its input.
pub fn peek<'a, O, P>(mut parser: P) -> impl Parser<'a, O>
where
    P: Parser<'a, O>,
{
    move |input: Cursor<'a>| -> Outcome<'a, O> {
        let (value, _) = parser.parse(input)?;
        Ok((value, input))
    }
}

#[cfg(test)]
#[path = "combinator_tests.rs"]
mod tests;
