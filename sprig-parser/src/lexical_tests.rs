#[cfg(test)]
mod tests {
    use crate::combinator::{Failure, Parser};
    use crate::cursor::Cursor;
    use crate::lexical::*;

    fn run<'a, O>(
        mut parser: impl Parser<'a, O>,
        source: &'a str,
    ) -> Result<(O, &'a str), Failure> {
        parser
            .parse(Cursor::new(source))
            .map(|(value, rest)| (value, rest.as_str()))
    }

    // ===== Whitespace and comments =====

    #[test]
    fn test_whitespace() {
        assert_eq!(run(whitespace(), " \t\r\n x"), Ok(((), "x")));
        assert_eq!(run(whitespace(), "x"), Ok(((), "x")));
        assert_eq!(run(whitespace(), ""), Ok(((), "")));
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        assert_eq!(run(line_comment(), "; note\n(a)"), Ok(("; note", "\n(a)")));
        assert_eq!(run(line_comment(), ";"), Ok((";", "")));
        assert_eq!(run(line_comment(), "a ;"), Err(Failure::Backtrack));
    }

    #[test]
    fn test_skip_trivia_mixes_comments_and_whitespace() {
        let source = "  ; first\n\t; second\n  (x)";
        assert_eq!(run(skip_trivia(), source), Ok(((), "(x)")));
        assert_eq!(run(skip_trivia(), "x"), Ok(((), "x")));
    }

    // ===== Strings =====

    #[test]
    fn test_string_literal() {
        assert_eq!(run(string_literal(), "\"hello\" rest"), Ok(("hello", " rest")));
        assert_eq!(run(string_literal(), "\"\""), Ok(("", "")));
    }

    #[test]
    fn test_string_literal_keeps_delimiters_inside() {
        assert_eq!(
            run(string_literal(), "\"a (b) ; c\nd\")"),
            Ok(("a (b) ; c\nd", ")"))
        );
    }

    #[test]
    fn test_unterminated_string_fails() {
        assert_eq!(run(string_literal(), "\"open"), Err(Failure::Backtrack));
        assert_eq!(run(string_literal(), "open\""), Err(Failure::Backtrack));
    }

    // ===== Atoms =====

    #[test]
    fn test_atom_consumes_trailing_whitespace() {
        assert_eq!(run(atom(), "define  (f)"), Ok(("define", "(f)")));
        assert_eq!(run(atom(), "x)"), Ok(("x", ")")));
        assert_eq!(run(atom(), "+"), Ok(("+", "")));
    }

    #[test]
    fn test_atom_stops_at_delimiters() {
        assert_eq!(run(atom(), "a\"b\""), Ok(("a", "\"b\"")));
        assert_eq!(run(atom(), "a;comment"), Ok(("a", ";comment")));
        assert_eq!(run(atom(), "λ.x"), Ok(("λ.x", "")));
    }

    #[test]
    fn test_atom_needs_one_character() {
        assert_eq!(run(atom(), "(a)"), Err(Failure::Backtrack));
        assert_eq!(run(atom(), " a"), Err(Failure::Backtrack));
        assert_eq!(run(atom(), ""), Err(Failure::Backtrack));
    }

    // ===== Numbers and booleans =====

    #[test]
    fn test_unsigned_integer() {
        assert_eq!(run(unsigned_integer(), "42)"), Ok((42, ")")));
        assert_eq!(run(unsigned_integer(), "007"), Ok((7, "")));
        assert_eq!(
            run(unsigned_integer(), "18446744073709551615"),
            Ok((u64::MAX, ""))
        );
        assert_eq!(run(unsigned_integer(), "x1"), Err(Failure::Backtrack));
    }

    #[test]
    fn test_unsigned_integer_overflow_backtracks() {
        assert_eq!(
            run(unsigned_integer(), "18446744073709551616"),
            Err(Failure::Backtrack)
        );
        assert_eq!(run(digits(), "18446744073709551616 "), Ok(("18446744073709551616", " ")));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(run(boolean(), "#t"), Ok((true, "")));
        assert_eq!(run(boolean(), "#f)"), Ok((false, ")")));
        assert_eq!(run(boolean(), "#true"), Err(Failure::Backtrack));
        assert_eq!(run(boolean(), "#x"), Err(Failure::Backtrack));
    }
}
