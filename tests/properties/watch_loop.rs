//! Property tests for the watch loop driver.

use std::cell::Cell;

use proptest::prelude::*;

use tilde::application::WatchLoop;
use tilde::{Action, Iteration};

use super::strategies::{cancel_action, continue_action};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the loop absorbs every continue decision, runs the task
    /// once per trigger plus once up front, and returns the cancel verbatim.
    #[test]
    fn property_loop_returns_the_first_cancel(
        script in proptest::collection::vec(continue_action(), 0..40),
        cancel in cancel_action(),
        start in 0u32..1000,
    ) {
        let triggers = script.iter().filter(|a| **a == Action::Trigger).count() as u32;
        let mut queue = script.clone();
        queue.push(cancel.clone());
        queue.reverse();

        let runs = Cell::new(0u32);
        let outcome = WatchLoop::starting_at(Iteration::new(start)).run(
            || runs.set(runs.get() + 1),
            |_: Iteration| Ok(Action::Ignore),
            |_: Iteration| Ok(queue.pop().unwrap_or(Action::CancelWatch)),
            |_| {},
        );

        prop_assert_eq!(runs.get(), triggers + 1);
        prop_assert_eq!(outcome.iteration, Iteration::new(start + triggers + 1));
        prop_assert_eq!(outcome.action.rank(), cancel.rank());
        prop_assert!(outcome.action.is_cancel());
    }

    /// PROPERTY: an error from `next_action` after any number of cycles
    /// becomes `HandleError`, never a panic or a hang.
    #[test]
    fn property_callback_errors_become_handle_error(fail_at in 1usize..30) {
        let calls = Cell::new(0usize);
        let outcome = WatchLoop::new().run(
            || {},
            |_: Iteration| Ok(Action::Ignore),
            |_: Iteration| {
                calls.set(calls.get() + 1);
                if calls.get() >= fail_at {
                    Err(anyhow::anyhow!("source failed"))
                } else {
                    Ok(Action::Trigger)
                }
            },
            |_| {},
        );

        prop_assert!(matches!(outcome.action, Action::HandleError(_)));
        prop_assert_eq!(outcome.iteration, Iteration::new(fail_at as u32));
    }
}
