//! Every error kind, reached through the public entry points

use sprig_core::{ArenaError, Limits};
use sprig_parser::{parse, parse_with_limits, ErrorKind, ParseError};

fn kind_of(source: &str, limits: Limits) -> ErrorKind {
    parse_with_limits(source, limits).unwrap_err().kind()
}

#[test]
fn test_syntax_error() {
    let error = parse("(a b) ) c").unwrap_err();
    assert_eq!(error, ParseError::Syntax { offset: 6 });
    assert_eq!(error.to_string(), "Invalid syntax at byte offset 6");
    assert!(!error.is_resource_error());
}

#[test]
fn test_unexpected_eof_error() {
    for source in ["(", "(a (b)", "\"unterminated", "(a . "] {
        let error = parse(source).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof, "{}", source);
    }
}

#[test]
fn test_integer_overflow_error() {
    let error = parse("(+ 1 99999999999999999999)").unwrap_err();
    assert_eq!(
        error,
        ParseError::IntegerOverflow {
            offset: 5,
            text: "99999999999999999999".to_string()
        }
    );
    assert!(error.to_string().contains("does not fit in 64 bits"));
}

#[test]
fn test_capacity_errors() {
    assert_eq!(
        kind_of("(((x)))", Limits::default().with_max_depth(2)),
        ErrorKind::MaxDepthExceeded
    );
    assert_eq!(
        kind_of("(1 2 3)", Limits::default().with_max_list_len(2)),
        ErrorKind::ListTooLong
    );
    assert_eq!(
        kind_of("\"abcdef\"", Limits::default().with_max_text_len(5)),
        ErrorKind::TextTooLong
    );
    assert_eq!(
        kind_of("(a b) (c d)", Limits::default().with_max_nodes(5)),
        ErrorKind::Arena
    );
}

#[test]
fn test_node_limit_is_exact() {
    // Three nodes per list: the list itself and two atoms.
    assert!(parse_with_limits("(a b) (c d)", Limits::default().with_max_nodes(6)).is_ok());

    let error = parse_with_limits("(a b) (c d)", Limits::default().with_max_nodes(5)).unwrap_err();
    assert_eq!(
        error,
        ParseError::Arena(ArenaError::AllocationExhausted { capacity: 5 })
    );
    assert!(error.is_resource_error());
}

#[test]
fn test_zero_capacity_arena() {
    assert!(parse_with_limits("", Limits::default().with_max_nodes(0)).is_ok());
    assert_eq!(
        kind_of("x", Limits::default().with_max_nodes(0)),
        ErrorKind::Arena
    );
}

fn nested_atom(depth: usize) -> String {
    format!("{}x{}", "(".repeat(depth), ")".repeat(depth))
}

/// Parses on a thread with the usual 2 MiB spawn stack.
fn parse_on_small_stack(source: String) -> Result<usize, ParseError> {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || parse(&source).map(|parsed| parsed.node_count()))
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn test_default_depth_limit_on_small_stack() {
    let max_depth = Limits::default().max_depth;
    assert_eq!(
        parse_on_small_stack(nested_atom(max_depth + 1)),
        Err(ParseError::MaxDepthExceeded {
            depth: max_depth,
            max_depth
        })
    );
}

#[test]
fn test_default_depth_fits_small_stack() {
    let max_depth = Limits::default().max_depth;
    assert_eq!(parse_on_small_stack(nested_atom(max_depth)), Ok(max_depth + 1));
}
