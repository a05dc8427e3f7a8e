//! Immutable view over the unconsumed part of the input

use std::fmt;

/// A position in a source buffer.
///
/// `Cursor` is `Copy`; advancing returns a new cursor and never touches the
/// text. The remaining input is always a suffix of the original buffer, and
/// the offset always sits on a `char` boundary.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// The whole buffer this cursor points into.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset from the start of the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Remaining length in bytes.
    pub fn len(&self) -> usize {
        self.source.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.offset == self.source.len()
    }

    /// The unconsumed input.
    pub fn as_str(&self) -> &'a str {
        &self.source[self.offset..]
    }

    pub fn peek(&self) -> Option<char> {
        self.as_str().chars().next()
    }

    /// Splits off the next character.
    pub fn next_char(self) -> Option<(char, Cursor<'a>)> {
        let c = self.peek()?;
        Some((c, self.advance(c.len_utf8())))
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }

    /// Moves forward by `bytes`, clamped to the end of input. Callers only
    /// pass lengths of text they have just matched.
    pub fn advance(self, bytes: usize) -> Self {
        let offset = (self.offset + bytes).min(self.source.len());
        debug_assert!(self.source.is_char_boundary(offset));
        Self {
            source: self.source,
            offset,
        }
    }

    /// The text between this cursor and a later one over the same buffer.
    pub fn consumed_until(&self, later: Cursor<'a>) -> &'a str {
        debug_assert!(std::ptr::eq(self.source, later.source));
        let end = later.offset.max(self.offset);
        &self.source[self.offset..end]
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 16;
        let rest = self.as_str();
        let preview: String = rest.chars().take(PREVIEW).collect();
        let ellipsis = if rest.chars().nth(PREVIEW).is_some() { "..." } else { "" };
        write!(f, "Cursor@{} {:?}{}", self.offset, preview, ellipsis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_slice() {
        let start = Cursor::new("hello world");
        let later = start.advance(5);

        assert_eq!(later.offset(), 5);
        assert_eq!(later.as_str(), " world");
        assert_eq!(later.len(), 6);
        assert_eq!(start.consumed_until(later), "hello");
        assert_eq!(start.as_str(), "hello world");
    }

    #[test]
    fn test_advance_clamps_at_end() {
        let cursor = Cursor::new("ab").advance(10);
        assert!(cursor.is_empty());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.next_char(), None);
    }

    #[test]
    fn test_next_char_handles_multibyte() {
        let cursor = Cursor::new("λx");
        let (c, rest) = cursor.next_char().unwrap();
        assert_eq!(c, 'λ');
        assert_eq!(rest.offset(), 2);
        assert_eq!(rest.as_str(), "x");
    }

    #[test]
    fn test_debug_preview() {
        let cursor = Cursor::new("(define (square x) (* x x))").advance(1);
        let shown = format!("{:?}", cursor);
        assert!(shown.starts_with("Cursor@1 \"define (square x\""));
        assert!(shown.ends_with("..."));
    }
}
