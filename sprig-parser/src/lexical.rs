//! Token-level parsers for S-expression source text
//!
//! Everything here is built from the combinators in [`crate::combinator`] and
//! is pure: nothing allocates in the value arena. The grammar decides what
//! to do with the text these return.

use crate::combinator::*;
use crate::cursor::Cursor;

/// Characters that end an atom.
pub const ATOM_DELIMITERS: &str = " \t\n\r()\";";

pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Zero or more whitespace characters.
pub fn whitespace<'a>() -> impl Parser<'a, ()> {
    many(satisfy(is_whitespace), || (), |_, _| ())
}

/// A `;` comment running to the end of the line. The newline itself is left
/// for [`whitespace`].
pub fn line_comment<'a>() -> impl Parser<'a, &'a str> {
    recognize(sequence_right(
        character(';'),
        many(none_of("\n"), || (), |_, _| ()),
    ))
}

/// Any run of whitespace and line comments. Never fails.
pub fn skip_trivia<'a>() -> impl Parser<'a, ()> {
    let blank = many1(satisfy(is_whitespace), || (), |_, _| ());
    let comment = map(line_comment(), |_| ());
    many(alternative(blank, comment), || (), |_, _| ())
}

/// A double-quoted string. Returns the body without the quotes. There are no
/// escape sequences, so the body is any run of non-quote characters and may
/// span lines. A missing closing quote fails.
pub fn string_literal<'a>() -> impl Parser<'a, &'a str> {
    delimited(
        character('"'),
        recognize(many(none_of("\""), || (), |_, _| ())),
        character('"'),
    )
}

pub fn atom_char<'a>() -> impl Parser<'a, char> {
    none_of(ATOM_DELIMITERS)
}

/// One or more atom characters, followed by any whitespace. Returns the
/// atom text only.
pub fn atom<'a>() -> impl Parser<'a, &'a str> {
    sequence_left(recognize(many1(atom_char(), || (), |_, _| ())), whitespace())
}

/// One or more ASCII digits.
pub fn digits<'a>() -> impl Parser<'a, &'a str> {
    recognize(many1(satisfy(|c| c.is_ascii_digit()), || (), |_, _| ()))
}

/// A non-negative decimal integer. A digit run that does not fit in `u64`
/// backtracks.
pub fn unsigned_integer<'a>() -> impl Parser<'a, u64> {
    let digit = map(satisfy(|c| c.is_ascii_digit()), |c: char| {
        u64::from(c.to_digit(10).unwrap_or(0))
    });
    let mut number = many1(digit, || Some(0u64), |acc: Option<u64>, d: u64| {
        acc.and_then(|n| n.checked_mul(10))
            .and_then(|n| n.checked_add(d))
    });
    move |input: Cursor<'a>| -> Outcome<'a, u64> {
        match number.parse(input)? {
            (Some(n), rest) => Ok((n, rest)),
            (None, _) => Err(Failure::Backtrack),
        }
    }
}

/// `#t` or `#f`, not followed by further atom characters.
pub fn boolean<'a>() -> impl Parser<'a, bool> {
    character('#')
        .ignore_then(one_of("tf"))
        .map(|c: char| c == 't')
        .then_ignore(not_followed_by(atom_char()))
}

#[cfg(test)]
#[path = "lexical_tests.rs"]
mod tests;
