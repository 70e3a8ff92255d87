//! Property tests for the termination handler.

use proptest::prelude::*;

use tilde::application::watch::parse_resume_command;
use tilde::application::{SessionState, TerminationHandler};
use tilde::domain::ports::CommandQueue;
use tilde::{Action, Iteration};

use super::strategies::{action, command};

fn queue() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        prop_oneof![
            3 => command(),
            1 => command().prop_map(|c| format!("__resume-watch 4 {}", c)),
        ],
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a resume directive decodes back to what encoded it.
    #[test]
    fn property_resume_directive_round_trips(n in any::<u32>(), cmd in command()) {
        let handler = TerminationHandler::new();
        let line = handler.resume_directive(Iteration::new(n), &cmd);
        prop_assert_eq!(
            parse_resume_command(&line, "__resume-watch"),
            Some((Iteration::new(n), cmd))
        );
    }

    /// PROPERTY: stale resume directives never survive termination, except
    /// the one a reload adds itself.
    #[test]
    fn property_stale_directives_are_dropped(
        terminal in action(),
        pending in queue(),
        n in 0u32..100,
    ) {
        let handler = TerminationHandler::new();
        let state = handler.on_termination(
            &terminal,
            "cargo build",
            Iteration::new(n),
            SessionState::new(pending.clone()),
        );

        let resumes: Vec<&String> = state
            .remaining_commands()
            .iter()
            .filter(|c| c.starts_with("__resume-watch"))
            .collect();
        match terminal {
            Action::Reload => {
                prop_assert_eq!(resumes.len(), 1);
                prop_assert_eq!(resumes[0], &format!("__resume-watch {} cargo build", n));
            }
            _ => prop_assert!(resumes.is_empty()),
        }
    }

    /// PROPERTY: surviving commands keep their relative order, after any
    /// commands the terminal action put in front.
    #[test]
    fn property_filtered_queue_is_a_suffix(terminal in action(), pending in queue()) {
        let handler = TerminationHandler::new();
        let state = handler.on_termination(
            &terminal,
            "make",
            Iteration::new(1),
            SessionState::new(pending.clone()),
        );

        let kept: Vec<String> = pending
            .into_iter()
            .filter(|c| !c.starts_with("__resume-watch"))
            .collect();
        prop_assert!(state.remaining_commands().ends_with(&kept));
        prop_assert_eq!(state.is_failed(), matches!(terminal, Action::HandleError(_)));
    }
}
