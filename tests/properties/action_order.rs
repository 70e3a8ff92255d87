//! Property tests for the action priority order.

use std::cmp::Ordering;

use proptest::prelude::*;

use super::strategies::{action, cancel_action, continue_action};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `compare` is antisymmetric.
    #[test]
    fn property_compare_is_antisymmetric(a in action(), b in action()) {
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }

    /// PROPERTY: `compare` is transitive.
    #[test]
    fn property_compare_is_transitive(a in action(), b in action(), c in action()) {
        if a.compare(&b) != Ordering::Greater && b.compare(&c) != Ordering::Greater {
            prop_assert_ne!(a.compare(&c), Ordering::Greater);
        }
    }

    /// PROPERTY: every action is equal in priority to itself.
    #[test]
    fn property_compare_is_reflexive(a in action()) {
        prop_assert_eq!(a.compare(&a), Ordering::Equal);
    }

    /// PROPERTY: every cancel outranks every continue.
    #[test]
    fn property_cancel_beats_continue(cancel in cancel_action(), cont in continue_action()) {
        prop_assert_eq!(cancel.compare(&cont), Ordering::Less);
    }

    /// PROPERTY: payloads never change the order.
    #[test]
    fn property_order_depends_only_on_variant(a in action(), b in action()) {
        if a.label() == b.label() {
            prop_assert_eq!(a.compare(&b), Ordering::Equal);
        }
    }
}
