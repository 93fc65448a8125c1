//! Property-based tests for the state registry.
//!
//! These tests use proptest to verify invariants hold across
//! many randomly generated operation sequences.

use hookstate::{StateRegistry, StateTransition};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

const UNIVERSE: u8 = 8;

#[derive(Clone, Debug)]
enum Op {
    Add(u8),
    Remove(u8),
    Set(u8),
}

prop_compose! {
    fn arbitrary_state()(state in 0..UNIVERSE) -> u8 {
        state
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_state().prop_map(Op::Add),
        arbitrary_state().prop_map(Op::Remove),
        arbitrary_state().prop_map(Op::Set),
    ]
}

fn seeded() -> StateRegistry<u8> {
    StateRegistry::from_states([0, 1, 2], 0).unwrap()
}

proptest! {
    #[test]
    fn current_state_is_always_registered(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let mut registry = seeded();

        for op in ops {
            let _ = match op {
                Op::Add(state) => registry.add_state(state),
                Op::Remove(state) => registry.remove_state(&state),
                Op::Set(state) => registry.set_state(state),
            };
            prop_assert!(registry.contains(registry.current()));
            prop_assert!(!registry.is_empty());
        }
    }

    #[test]
    fn failed_operations_leave_registry_unchanged(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let mut registry = seeded();

        for op in ops {
            let before_len = registry.len();
            let before_current = *registry.current();
            let before_history = registry.history().len();

            let result = match op {
                Op::Add(state) => registry.add_state(state),
                Op::Remove(state) => registry.remove_state(&state),
                Op::Set(state) => registry.set_state(state),
            };

            if result.is_err() {
                prop_assert_eq!(registry.len(), before_len);
                prop_assert_eq!(*registry.current(), before_current);
                prop_assert_eq!(registry.history().len(), before_history);
            }
        }
    }

    #[test]
    fn add_and_remove_change_size_by_one(state in arbitrary_state()) {
        let mut registry = seeded();
        let before = registry.len();

        if registry.add_state(state).is_ok() {
            prop_assert_eq!(registry.len(), before + 1);
            prop_assert!(registry.add_state(state).is_err());
            prop_assert!(registry.remove_state(&state).is_ok());
            prop_assert!(!registry.contains(&state));
        }
        prop_assert_eq!(registry.len(), before);
    }

    #[test]
    fn every_transition_fires_three_groups_in_order(targets in prop::collection::vec(0..3u8, 1..20)) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = seeded();

        let sink = Arc::clone(&log);
        registry.bind_transition(move |_| sink.lock().unwrap().push('g'));
        for state in 0..3u8 {
            let sink = Arc::clone(&log);
            registry.bind_exit(&state, move |_, _| sink.lock().unwrap().push('x')).unwrap();
            let sink = Arc::clone(&log);
            registry.bind_enter(&state, move |_, _| sink.lock().unwrap().push('e')).unwrap();
        }

        for target in &targets {
            registry.set_state(*target).unwrap();
        }

        let expected: String = "gxe".repeat(targets.len());
        let actual: String = log.lock().unwrap().iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn history_path_follows_transitions(targets in prop::collection::vec(0..3u8, 1..20)) {
        let mut registry = seeded();

        for target in &targets {
            registry.set_state(*target).unwrap();
        }

        let mut expected = vec![0u8];
        expected.extend(targets.iter().copied());
        let path: Vec<u8> = registry.history().get_path().into_iter().copied().collect();
        prop_assert_eq!(path, expected);

        let last: Option<&StateTransition<u8>> = registry.history().last();
        prop_assert_eq!(last.map(|t| t.to), targets.last().copied());
    }
}
