#[cfg(test)]
mod tests {
    use crate::value::*;

    // ===== Value Tests =====

    #[test]
    fn test_default_is_unassigned() {
        let value = Value::default();
        assert_eq!(value.kind(), ValueKind::Unassigned);
        assert!(!value.is_assigned());
    }

    #[test]
    fn test_value_type_predicates() {
        assert!(Value::Atom("x".to_string()).is_atom());
        assert!(Value::String("x".to_string()).is_string());
        assert!(Value::Integer(3).is_integer());
        assert!(Value::Boolean(true).is_boolean());
        assert!(Value::List(vec![]).is_list());
        assert!(Value::DottedList(vec![]).is_dotted_list());
        assert!(!Value::Integer(3).is_list());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Atom("car".to_string()).as_text(), Some("car"));
        assert_eq!(Value::String("s".to_string()).as_text(), Some("s"));
        assert_eq!(Value::Integer(9).as_text(), None);
        assert_eq!(Value::Integer(9).as_integer(), Some(9));
        assert_eq!(Value::Boolean(false).as_boolean(), Some(false));
        assert!(Value::Atom("a".to_string()).children().is_empty());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ValueKind::DottedList.to_string(), "dotted-list");
        assert_eq!(ValueKind::Atom.type_name(), "atom");
    }

    // ===== Datum Tests =====

    #[test]
    fn test_datum_display() {
        let datum = Datum::list([
            Datum::atom("define"),
            Datum::list([Datum::atom("f"), Datum::atom("x")]),
            Datum::string("doc"),
            Datum::dotted([Datum::int(1), Datum::int(2)], Datum::bool(false)),
        ]);
        assert_eq!(datum.to_string(), r#"(define (f x) "doc" (1 2 . #f))"#);
    }

    #[test]
    fn test_datum_metrics() {
        let datum = Datum::list([Datum::atom("a"), Datum::list([Datum::int(1)])]);
        assert_eq!(datum.node_count(), 4);
        assert_eq!(datum.depth(), 2);
        assert_eq!(Datum::atom("leaf").depth(), 0);
        assert_eq!(Datum::List(vec![]).depth(), 1);
    }

    #[test]
    fn test_datum_json_shape() {
        let datum = Datum::list([Datum::atom("a"), Datum::int(7)]);
        let json = serde_json::to_string(&datum).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"list","value":[{"kind":"atom","value":"a"},{"kind":"integer","value":7}]}"#
        );

        let back: Datum = serde_json::from_str(&json).unwrap();
        assert_eq!(back, datum);
    }
}
