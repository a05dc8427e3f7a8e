//! Textual form of values
//!
//! The output is re-readable by the grammar: reading a printed tree yields
//! the same shape and leaves.

use std::fmt::{self, Write};

pub fn write_atom<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    out.write_str(text)
}

/// String bodies never contain a double quote, so no escaping is needed.
pub fn write_string<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    out.write_char('"')?;
    out.write_str(text)?;
    out.write_char('"')
}

pub fn write_boolean<W: Write>(out: &mut W, value: bool) -> fmt::Result {
    out.write_str(if value { "#t" } else { "#f" })
}

/// Writes `(a b c)`, or `(a b . c)` when `dotted` is set.
pub fn write_sequence<W, T, F>(out: &mut W, items: &[T], dotted: bool, mut each: F) -> fmt::Result
where
    W: Write,
    F: FnMut(&mut W, &T) -> fmt::Result,
{
    out.write_char('(')?;
    let last = items.len().saturating_sub(1);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_str(if dotted && i == last { " . " } else { " " })?;
        }
        each(out, item)?;
    }
    out.write_char(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sequence() {
        let mut out = String::new();
        write_sequence(&mut out, &["a", "b", "c"], false, |o, s| write_atom(o, s)).unwrap();
        assert_eq!(out, "(a b c)");
    }

    #[test]
    fn test_dotted_sequence() {
        let mut out = String::new();
        write_sequence(&mut out, &["a", "b", "c"], true, |o, s| write_atom(o, s)).unwrap();
        assert_eq!(out, "(a b . c)");
    }

    #[test]
    fn test_empty_sequence() {
        let mut out = String::new();
        write_sequence::<_, &str, _>(&mut out, &[], false, |o, s| write_atom(o, s)).unwrap();
        assert_eq!(out, "()");
    }

    #[test]
    fn test_leaves() {
        let mut out = String::new();
        write_string(&mut out, "hi there").unwrap();
        out.push(' ');
        write_boolean(&mut out, false).unwrap();
        assert_eq!(out, "\"hi there\" #f");
    }
}
