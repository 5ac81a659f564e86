//! Property-based tests over the kind-set algebra and the synthesized box
//! block: set semantics are order-insensitive, accumulation is monotone,
//! and synthesis is deterministic.

use proptest::prelude::*;

use phpgo_compiler::solver::solve_arithmetic;
use phpgo_compiler::types::{Kind, Types};
use phpgo_compiler::varinfo::VarInfo;

fn leaf_kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Int),
        Just(Kind::Float),
        Just(Kind::String),
        Just(Kind::Bool),
        Just(Kind::Null),
        Just(Kind::Array(Box::new(Types::single(Kind::Int)))),
        Just(Kind::Array(Box::new(Types::single(Kind::String)))),
    ]
}

fn kind_vec() -> impl Strategy<Value = Vec<Kind>> {
    proptest::collection::vec(leaf_kind(), 1..6)
}

proptest! {
    #[test]
    fn types_equality_ignores_insertion_order(kinds in kind_vec()) {
        let forward = Types::of(kinds.clone());
        let mut reversed_kinds = kinds;
        reversed_kinds.reverse();
        let reversed = Types::of(reversed_kinds);

        prop_assert_eq!(&forward, &reversed);
        prop_assert_eq!(forward.len(), reversed.len());
    }

    #[test]
    fn push_is_idempotent(kinds in kind_vec()) {
        let once = Types::of(kinds.clone());
        let mut twice = Types::of(kinds.clone());
        for kind in kinds {
            twice.push(kind);
        }
        prop_assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn merge_is_monotone(left in kind_vec(), right in kind_vec()) {
        let before = Types::of(left);
        let other = Types::of(right);
        let mut merged = before.clone();
        merged.merge(&other);

        prop_assert!(merged.contains_all(&before));
        prop_assert!(merged.contains_all(&other));
    }

    #[test]
    fn go_name_is_box_exactly_when_polymorphic(kinds in kind_vec()) {
        let types = Types::of(kinds);
        if types.len() > 1 {
            prop_assert_eq!(types.go_name(), "Var");
        } else {
            prop_assert_ne!(types.go_name(), "Var");
        }
    }

    #[test]
    fn arithmetic_solving_is_commutative(left in kind_vec(), right in kind_vec()) {
        let left = Types::of(left);
        let right = Types::of(right);
        prop_assert_eq!(
            solve_arithmetic(&left, &right),
            solve_arithmetic(&right, &left)
        );
    }

    #[test]
    fn box_synthesis_ignores_observation_order(sets in proptest::collection::vec(kind_vec(), 1..5)) {
        let mut forward = VarInfo::new();
        for kinds in &sets {
            forward.observe(&Types::of(kinds.clone()));
        }

        let mut reversed = VarInfo::new();
        for kinds in sets.iter().rev() {
            let mut reversed_kinds = kinds.clone();
            reversed_kinds.reverse();
            reversed.observe(&Types::of(reversed_kinds));
        }

        prop_assert_eq!(forward.generate(), reversed.generate());
    }
}
