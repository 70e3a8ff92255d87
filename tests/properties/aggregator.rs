//! Property tests for tick aggregation.

use std::cmp::Ordering;

use proptest::prelude::*;

use tilde::aggregate;

use super::strategies::action;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the winner is never outranked by any candidate.
    #[test]
    fn property_winner_is_minimal(actions in proptest::collection::vec(action(), 1..12)) {
        let candidates: Vec<_> = actions.iter().cloned().enumerate().map(|(i, a)| (a, i)).collect();
        let (winner, _) = aggregate(candidates).unwrap();
        for a in &actions {
            prop_assert_ne!(winner.compare(a), Ordering::Greater);
        }
    }

    /// PROPERTY: among equal-priority candidates the earliest wins.
    #[test]
    fn property_first_of_equals_wins(actions in proptest::collection::vec(action(), 1..12)) {
        let candidates: Vec<_> = actions.iter().cloned().enumerate().map(|(i, a)| (a, i)).collect();
        let (winner, index) = aggregate(candidates).unwrap();
        let first = actions
            .iter()
            .position(|a| a.compare(&winner) == Ordering::Equal)
            .unwrap();
        prop_assert_eq!(index, first);
    }

    /// PROPERTY: the winning priority does not depend on arrival order.
    #[test]
    fn property_winning_rank_is_order_independent(
        actions in proptest::collection::vec(action(), 1..12)
    ) {
        let forward = aggregate(actions.iter().cloned().map(|a| (a, ()))).unwrap().0;
        let backward = aggregate(actions.iter().rev().cloned().map(|a| (a, ()))).unwrap().0;
        prop_assert_eq!(forward.rank(), backward.rank());
    }
}

#[test]
fn empty_tick_has_no_winner() {
    assert!(aggregate(Vec::<(tilde::Action, ())>::new()).is_none());
}
