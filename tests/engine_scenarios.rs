// Integration tests for the execution engine, one section per list topology

use listtrace::engine::{listing, Engine, EngineError, OperationKind, Outcome, Params, Variant};
use listtrace::memory::{MemoryState, Value};

/// Build a list by appending `values` at the tail
fn build(variant: Variant, values: &[i64]) -> Engine {
    let mut engine = Engine::new();
    for &v in values {
        engine
            .execute(variant, OperationKind::InsertTail, Params::value(v))
            .expect("insertTail failed");
    }
    engine
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Int(v)).collect()
}

fn assert_settled(engine: &Engine, variant: Variant) {
    let state = engine.get_memory_state();
    assert!(
        state.check_links(variant).is_ok(),
        "{:?}",
        state.check_links(variant)
    );
}

// ---------------------------------------------------------------------------
// Singly
// ---------------------------------------------------------------------------

#[test]
fn test_singly_insert_head_on_empty_list() {
    let mut engine = Engine::new();
    let steps = engine
        .execute_operation("singly", "insertHead", Params::value(5))
        .unwrap();

    assert_eq!(steps.len(), 4);
    let last = &steps[3].memory_state;
    let head = last.head.expect("head should be set");
    let node = last.node(head).unwrap();
    assert_eq!(node.value, Value::Int(5));
    assert_eq!(node.next, None);
    assert_eq!(last.tail, Some(head));
}

#[test]
fn test_singly_delete_tail_of_single_node() {
    let mut engine = build(Variant::Singly, &[7]);
    let steps = engine
        .execute(Variant::Singly, OperationKind::DeleteTail, Params::none())
        .unwrap();

    let last = &steps.last().unwrap().memory_state;
    assert_eq!(last.head, None);
    assert_eq!(last.tail, None);
    assert!(last.is_empty());
    assert_eq!(engine.last_outcome(), Some(&Outcome::Done));
}

#[test]
fn test_singly_delete_tail_walks_to_predecessor() {
    let mut engine = build(Variant::Singly, &[1, 2, 3, 4]);
    let steps = engine
        .execute(Variant::Singly, OperationKind::DeleteTail, Params::none())
        .unwrap();

    // prev walks from [1] to [3] one node at a time
    let walk_steps = steps.iter().filter(|s| s.active_line == 9).count();
    assert_eq!(walk_steps, 2);
    assert_eq!(engine.get_memory_state().values(), ints(&[1, 2, 3]));
    assert_settled(&engine, Variant::Singly);
}

#[test]
fn test_singly_reverse_then_traverse() {
    let mut engine = build(Variant::Singly, &[10, 20, 30]);
    let before = engine.get_memory_state();

    engine
        .execute(Variant::Singly, OperationKind::Reverse, Params::none())
        .unwrap();
    let after = engine.get_memory_state();
    assert_eq!(after.head, before.tail);
    assert_eq!(after.tail, before.head);

    engine
        .execute(Variant::Singly, OperationKind::Traverse, Params::none())
        .unwrap();
    assert_eq!(
        engine.last_outcome(),
        Some(&Outcome::Visited(ints(&[30, 20, 10])))
    );
    assert_settled(&engine, Variant::Singly);
}

#[test]
fn test_singly_reverse_single_node_is_noop() {
    let mut engine = build(Variant::Singly, &[1]);
    let steps = engine
        .execute(Variant::Singly, OperationKind::Reverse, Params::none())
        .unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(engine.last_outcome(), Some(&Outcome::NoOp));
}

#[test]
fn test_singly_insert_at_positions() {
    let mut engine = build(Variant::Singly, &[1, 3]);
    engine
        .execute(Variant::Singly, OperationKind::InsertAt, Params::value(2).at(1))
        .unwrap();
    engine
        .execute(Variant::Singly, OperationKind::InsertAt, Params::value(0).at(0))
        .unwrap();
    engine
        .execute(Variant::Singly, OperationKind::InsertAt, Params::value(9).at(100))
        .unwrap();

    let state = engine.get_memory_state();
    assert_eq!(state.values(), ints(&[0, 1, 2, 3, 9]));
    assert_eq!(state.value_at(state.tail), Some(&Value::Int(9)));
    assert_settled(&engine, Variant::Singly);
}

#[test]
fn test_singly_delete_value_first_match_wins() {
    let mut engine = build(Variant::Singly, &[4, 5, 4]);
    engine
        .execute(Variant::Singly, OperationKind::DeleteValue, Params::value(4))
        .unwrap();
    assert_eq!(engine.get_memory_state().values(), ints(&[5, 4]));

    let steps = engine
        .execute(Variant::Singly, OperationKind::DeleteValue, Params::value(42))
        .unwrap();
    assert!(steps.last().unwrap().description.contains("not found"));
    assert_eq!(engine.last_outcome(), Some(&Outcome::NoOp));
}

#[test]
fn test_empty_list_operations_still_record_a_step() {
    for op in [
        OperationKind::DeleteHead,
        OperationKind::DeleteTail,
        OperationKind::Reverse,
        OperationKind::Traverse,
    ] {
        let mut engine = Engine::new();
        let steps = engine.execute(Variant::Singly, op, Params::none()).unwrap();
        assert!(!steps.is_empty(), "{} recorded nothing", op);
    }
}

#[test]
fn test_search_uses_value_equality_for_text() {
    let mut engine = Engine::new();
    for page in ["home", "news", "mail"] {
        engine
            .execute(Variant::Singly, OperationKind::InsertTail, Params::value(page))
            .unwrap();
    }
    engine
        .execute(Variant::Singly, OperationKind::Search, Params::value("mail"))
        .unwrap();
    assert_eq!(engine.last_outcome().and_then(|o| o.index()), Some(2));
}

// ---------------------------------------------------------------------------
// Doubly
// ---------------------------------------------------------------------------

#[test]
fn test_doubly_search_found_and_missing() {
    let mut engine = build(Variant::Doubly, &[10, 20, 30]);

    engine
        .execute(Variant::Doubly, OperationKind::Search, Params::value(20))
        .unwrap();
    assert_eq!(engine.last_outcome(), Some(&Outcome::Found(1)));

    let steps = engine
        .execute(Variant::Doubly, OperationKind::Search, Params::value(99))
        .unwrap();
    assert!(steps.last().unwrap().description.contains("not found"));
    assert_eq!(engine.last_outcome().and_then(|o| o.index()), Some(-1));
}

#[test]
fn test_doubly_delete_tail_is_constant_time() {
    let mut engine = build(Variant::Doubly, &[1, 2, 3, 4, 5]);
    let steps = engine
        .execute(Variant::Doubly, OperationKind::DeleteTail, Params::none())
        .unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(engine.get_memory_state().values(), ints(&[1, 2, 3, 4]));
    assert_settled(&engine, Variant::Doubly);
}

#[test]
fn test_doubly_reverse_keeps_back_links() {
    let mut engine = build(Variant::Doubly, &[1, 2, 3]);
    engine
        .execute(Variant::Doubly, OperationKind::Reverse, Params::none())
        .unwrap();

    let state = engine.get_memory_state();
    assert_eq!(state.values(), ints(&[3, 2, 1]));
    let backward: Vec<Value> = state
        .walk_backward()
        .into_iter()
        .filter_map(|id| state.value_at(Some(id)).cloned())
        .collect();
    assert_eq!(backward, ints(&[1, 2, 3]));
    assert_settled(&engine, Variant::Doubly);
}

#[test]
fn test_doubly_browser_history() {
    let mut engine = Engine::new();
    for page in ["a", "b", "c"] {
        engine
            .execute(Variant::Doubly, OperationKind::Visit, Params::value(page))
            .unwrap();
    }
    engine
        .execute(Variant::Doubly, OperationKind::Back, Params::none())
        .unwrap();
    engine
        .execute(Variant::Doubly, OperationKind::Back, Params::none())
        .unwrap();

    let state = engine.get_memory_state();
    assert_eq!(state.value_at(state.curr), Some(&Value::Text("a".into())));

    // Visiting from the middle drops the forward pages
    engine
        .execute(Variant::Doubly, OperationKind::Visit, Params::value("d"))
        .unwrap();
    let state = engine.get_memory_state();
    assert_eq!(
        state.values(),
        vec![Value::Text("a".into()), Value::Text("d".into())]
    );
    assert_eq!(state.len(), 2);
    assert_eq!(state.curr, state.tail);

    let steps = engine
        .execute(Variant::Doubly, OperationKind::Forward, Params::none())
        .unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(engine.last_outcome(), Some(&Outcome::NoOp));
    assert_settled(&engine, Variant::Doubly);
}

#[test]
fn test_doubly_deleting_curr_moves_it() {
    let mut engine = Engine::new();
    for page in [1, 2] {
        engine
            .execute(Variant::Doubly, OperationKind::Visit, Params::value(page))
            .unwrap();
    }
    engine
        .execute(Variant::Doubly, OperationKind::DeleteValue, Params::value(2))
        .unwrap();
    let state = engine.get_memory_state();
    assert_eq!(state.value_at(state.curr), Some(&Value::Int(1)));
    assert_settled(&engine, Variant::Doubly);
}

// ---------------------------------------------------------------------------
// Circular singly
// ---------------------------------------------------------------------------

#[test]
fn test_circular_singly_traverse_takes_one_lap() {
    let mut engine = build(Variant::CircularSingly, &[1, 2, 3]);
    let steps = engine
        .execute(Variant::CircularSingly, OperationKind::Traverse, Params::none())
        .unwrap();

    // start + one per node + complete
    assert_eq!(steps.len(), 5);
    assert_eq!(
        engine.last_outcome(),
        Some(&Outcome::Visited(ints(&[1, 2, 3])))
    );
}

#[test]
fn test_circular_singly_tail_closes_ring() {
    let mut engine = build(Variant::CircularSingly, &[1, 2]);
    engine
        .execute(Variant::CircularSingly, OperationKind::InsertHead, Params::value(0))
        .unwrap();

    let state = engine.get_memory_state();
    let tail = state.tail.unwrap();
    assert_eq!(state.node(tail).unwrap().next, state.head);
    assert_eq!(state.values(), ints(&[0, 1, 2]));
    assert_settled(&engine, Variant::CircularSingly);
}

#[test]
fn test_circular_singly_round_robin() {
    let mut engine = build(Variant::CircularSingly, &[1, 2, 3]);
    let mut seen = Vec::new();
    for _ in 0..4 {
        engine
            .execute(Variant::CircularSingly, OperationKind::Advance, Params::none())
            .unwrap();
        let state = engine.get_memory_state();
        seen.push(state.value_at(state.curr).cloned().unwrap());
    }
    assert_eq!(seen, ints(&[1, 2, 3, 1]));

    // The running task finishes and curr wraps to the head
    engine
        .execute(Variant::CircularSingly, OperationKind::DeleteHead, Params::none())
        .unwrap();
    let state = engine.get_memory_state();
    assert_eq!(state.value_at(state.curr), Some(&Value::Int(2)));
    assert_settled(&engine, Variant::CircularSingly);
}

#[test]
fn test_circular_singly_delete_down_to_empty() {
    let mut engine = build(Variant::CircularSingly, &[1, 2, 3]);
    engine
        .execute(Variant::CircularSingly, OperationKind::DeleteValue, Params::value(3))
        .unwrap();
    assert_settled(&engine, Variant::CircularSingly);
    engine
        .execute(Variant::CircularSingly, OperationKind::DeleteTail, Params::none())
        .unwrap();
    assert_settled(&engine, Variant::CircularSingly);
    engine
        .execute(Variant::CircularSingly, OperationKind::DeleteHead, Params::none())
        .unwrap();
    assert_eq!(engine.get_memory_state(), MemoryState::default());

    engine
        .execute(Variant::CircularSingly, OperationKind::DeleteHead, Params::none())
        .unwrap();
    assert_eq!(engine.last_outcome(), Some(&Outcome::NoOp));
}

// ---------------------------------------------------------------------------
// Circular doubly
// ---------------------------------------------------------------------------

#[test]
fn test_circular_doubly_delete_both_ends() {
    let mut engine = build(Variant::CircularDoubly, &[1, 2, 3, 4]);
    engine
        .execute(Variant::CircularDoubly, OperationKind::DeleteHead, Params::none())
        .unwrap();
    engine
        .execute(Variant::CircularDoubly, OperationKind::DeleteTail, Params::none())
        .unwrap();

    let state = engine.get_memory_state();
    assert_eq!(state.values(), ints(&[2, 3]));
    let head = state.head.unwrap();
    assert_eq!(state.node(head).unwrap().prev, state.tail);
    assert_settled(&engine, Variant::CircularDoubly);
}

#[test]
fn test_circular_doubly_retreat_wraps() {
    let mut engine = build(Variant::CircularDoubly, &[1, 2, 3]);
    engine
        .execute(Variant::CircularDoubly, OperationKind::Advance, Params::none())
        .unwrap();
    engine
        .execute(Variant::CircularDoubly, OperationKind::Retreat, Params::none())
        .unwrap();

    let state = engine.get_memory_state();
    assert_eq!(state.value_at(state.curr), Some(&Value::Int(3)));
}

#[test]
fn test_circular_doubly_insert_root_tracks_minimum() {
    let mut engine = Engine::new();
    for v in [5, 8, 2, 7] {
        engine
            .execute(Variant::CircularDoubly, OperationKind::InsertRoot, Params::value(v))
            .unwrap();
        assert_settled(&engine, Variant::CircularDoubly);
    }

    let state = engine.get_memory_state();
    assert_eq!(state.len(), 4);
    assert_eq!(state.value_at(state.curr), Some(&Value::Int(2)));

    let min_var = engine
        .steps()
        .last()
        .and_then(|s| s.variables.pointer("min"));
    assert_eq!(min_var, state.curr);
}

// ---------------------------------------------------------------------------
// Engine facade
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_names_fail_fast() {
    let mut engine = Engine::new();
    assert_eq!(
        engine
            .execute_operation("skip-list", "insertHead", Params::value(1))
            .unwrap_err(),
        EngineError::UnsupportedVariant("skip-list".into())
    );
    assert!(matches!(
        engine.execute_operation("doubly", "rotate", Params::none()),
        Err(EngineError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        engine.execute_operation("circular-singly", "insertAt", Params::value(1).at(0)),
        Err(EngineError::UnsupportedOperation { .. })
    ));
    assert!(engine.steps().is_empty());
}

#[test]
fn test_snapshots_are_isolated_from_later_mutation() {
    let mut engine = Engine::new();
    let first = engine
        .execute(Variant::Singly, OperationKind::InsertHead, Params::value(1))
        .unwrap()
        .to_vec();
    engine
        .execute(Variant::Singly, OperationKind::InsertHead, Params::value(2))
        .unwrap();

    assert_eq!(first.last().unwrap().memory_state.len(), 1);
    assert_eq!(engine.get_memory_state().len(), 2);
}

#[test]
fn test_step_indices_and_listing_lines() {
    let shapes: &[&[i64]] = &[&[], &[2], &[1, 2, 3]];
    let requests = [Params::value(2).at(1), Params::value(9).at(0), Params::value(1).at(5)];

    for variant in Variant::ALL {
        for op in OperationKind::ALL.into_iter().filter(|op| variant.supports(*op)) {
            let lines = listing(variant, op).expect("listing missing");
            for shape in shapes {
                for params in &requests {
                    let mut engine = build(variant, shape);
                    let steps = engine.execute(variant, op, params.clone()).unwrap();
                    assert!(!steps.is_empty(), "{} {} on {:?} recorded nothing", variant, op, shape);

                    for (i, step) in steps.iter().enumerate() {
                        assert_eq!(step.index, i);
                        assert!(
                            step.active_line < lines.len(),
                            "{} {} on {:?} step {} points past the listing",
                            variant,
                            op,
                            shape,
                            i
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_no_step_holds_a_dangling_pointer() {
    let mut engine = build(Variant::Doubly, &[1, 2, 3]);
    engine
        .execute(Variant::Doubly, OperationKind::DeleteValue, Params::value(2))
        .unwrap();

    for step in engine.steps() {
        let state = &step.memory_state;
        for id in state.sorted_ids() {
            let node = state.node(id).unwrap();
            for target in [node.next, node.prev].into_iter().flatten() {
                assert!(state.node(target).is_some(), "step {} dangles", step.index);
            }
        }
        for reference in [state.head, state.tail, state.curr].into_iter().flatten() {
            assert!(state.node(reference).is_some(), "step {} dangles", step.index);
        }
    }
}

#[test]
fn test_reset_twice_matches_once() {
    let mut engine = build(Variant::Doubly, &[1, 2]);
    engine.reset();
    let once = engine.get_memory_state();
    engine.reset();
    assert_eq!(engine.get_memory_state(), once);
    assert!(once.is_empty());
}

#[test]
fn test_cursor_scrubs_without_rerunning() {
    let mut engine = build(Variant::Singly, &[1, 2]);
    engine
        .execute(Variant::Singly, OperationKind::DeleteHead, Params::none())
        .unwrap();
    let mut cursor = engine.cursor();

    assert!(cursor.seek_end());
    assert_eq!(cursor.current().unwrap().memory_state.len(), 1);
    while cursor.prev_step() {}
    assert_eq!(cursor.current().unwrap().memory_state.len(), 2);
    assert_eq!(engine.get_memory_state().len(), 1);
}
