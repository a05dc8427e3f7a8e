#[cfg(test)]
mod tests {
    use crate::error::{ArenaError, ArenaErrorKind};
    use crate::limits::Limits;
    use crate::value::{Datum, Value, ValueArena};
    use pretty_assertions::assert_eq;

    fn sample() -> Datum {
        Datum::list([
            Datum::atom("a"),
            Datum::atom("b"),
            Datum::list([Datum::atom("c"), Datum::int(1), Datum::int(2)]),
            Datum::string("str"),
        ])
    }

    #[test]
    fn test_insert_and_snapshot() {
        let mut arena = ValueArena::default();
        let root = arena.insert(&sample()).unwrap();

        assert_eq!(arena.len(), 8);
        assert_eq!(arena.snapshot(&root).unwrap(), sample());
        assert_eq!(arena.count_nodes(&root).unwrap(), 8);
    }

    #[test]
    fn test_render() {
        let mut arena = ValueArena::default();
        let root = arena.insert(&sample()).unwrap();
        assert_eq!(arena.render(&root).unwrap(), r#"(a b (c 1 2) "str")"#);

        let dotted = arena
            .insert(&Datum::dotted([Datum::atom("x")], Datum::bool(true)))
            .unwrap();
        assert_eq!(arena.render(&dotted).unwrap(), "(x . #t)");
    }

    #[test]
    fn test_release_tree_frees_every_node() {
        let mut arena = ValueArena::default();
        let root = arena.insert(&sample()).unwrap();
        let released = arena.release_tree(root).unwrap();

        assert_eq!(released, 8);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_release_tree_handles_reservations() {
        let mut arena = ValueArena::default();
        let mut parent = arena.reserve().unwrap();
        let child = arena.reserve().unwrap();
        arena.populate(&mut parent, Value::List(vec![child])).unwrap();

        assert_eq!(arena.release_tree(parent).unwrap(), 2);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_take_moves_children_with_value() {
        let mut arena = ValueArena::default();
        let root = arena.insert(&sample()).unwrap();
        let mut value = arena.take(root).unwrap();

        let children = value.take_children();
        assert_eq!(children.len(), 4);
        assert_eq!(arena.len(), 7);
        assert_eq!(arena.release_all(children).unwrap(), 7);
    }

    #[test]
    fn test_insert_rolls_back_on_exhaustion() {
        let mut arena = ValueArena::new(Limits::default().with_max_nodes(5));
        let err = arena.insert(&sample()).unwrap_err();

        assert_eq!(err, ArenaError::AllocationExhausted { capacity: 5 });
        assert!(arena.is_empty());
    }

    #[test]
    fn test_snapshot_of_unpopulated_fails() {
        let mut arena = ValueArena::with_capacity(2);
        let pending = arena.reserve().unwrap();
        assert_eq!(
            arena.snapshot(&pending).unwrap_err().kind(),
            ArenaErrorKind::Unpopulated
        );

        let mut unassigned = arena.reserve().unwrap();
        arena.populate(&mut unassigned, Value::default()).unwrap();
        assert_eq!(
            arena.snapshot(&unassigned).unwrap_err().kind(),
            ArenaErrorKind::Unpopulated
        );
    }

    #[test]
    fn test_borrow_mut_rewrites_leaf() {
        let mut arena = ValueArena::with_capacity(1);
        let handle = arena.allocate(Value::Integer(1)).unwrap();
        *arena.borrow_mut(&handle).unwrap() = Value::Integer(2);
        assert_eq!(arena.borrow(&handle).unwrap().as_integer(), Some(2));
    }

    #[test]
    fn test_clear_empties_store() {
        let mut arena = ValueArena::default();
        let root = arena.insert(&sample()).unwrap();
        let key = root.slot_id();
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.get(key).unwrap_err().kind(), ArenaErrorKind::UseAfterFree);
    }

    #[test]
    fn test_limits_configure_capacity() {
        let arena = ValueArena::new(Limits::default().with_max_nodes(17));
        assert_eq!(arena.capacity(), 17);
        assert_eq!(arena.limits().max_nodes, 17);
    }
}
