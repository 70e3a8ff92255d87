//! Watch loop driver
//!
//! Runs the build task, then asks the action source what to do next:
//!
//! ```text
//! run task -> on_start -> Ignore  -> poll next_action until non-Ignore
//!                      -> Trigger -> run task again
//!                      -> cancel  -> done
//! ```
//!
//! `Ignore` and `Trigger` are always absorbed here; the caller only ever sees
//! a cancel-category action. Failures from the callbacks, and panics from
//! anywhere in the loop, come back as `Action::HandleError` instead of
//! propagating.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::domain::entities::{Action, Failure};
use crate::domain::ports::ActionSource;
use crate::domain::value_objects::Iteration;
use crate::error::TildeError;

use super::event::WatchEvent;

/// Terminal result of a watch session.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOutcome {
    /// Always a cancel-category action
    pub action: Action,
    /// Completed task executions, including any carried over from `starting_at`
    pub iteration: Iteration,
}

/// Watch loop driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatchLoop {
    start: Iteration,
}

impl WatchLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume counting from a previous session
    pub fn starting_at(start: Iteration) -> Self {
        Self { start }
    }

    /// Run the loop with plain callbacks.
    pub fn run<T, S, N, F>(&self, task: T, on_start: S, next_action: N, on_event: F) -> WatchOutcome
    where
        T: FnMut(),
        S: FnMut(Iteration) -> anyhow::Result<Action>,
        N: FnMut(Iteration) -> anyhow::Result<Action>,
        F: Fn(WatchEvent),
    {
        let mut callbacks = Callbacks {
            on_start,
            next_action,
        };
        self.run_source(task, &mut callbacks, on_event)
    }

    /// Run the loop against an [`ActionSource`].
    ///
    /// The task's own failures are its business; only a panic escaping it
    /// ends the watch, and that task run is not counted.
    pub fn run_source<T, F>(
        &self,
        mut task: T,
        source: &mut dyn ActionSource,
        on_event: F,
    ) -> WatchOutcome
    where
        T: FnMut(),
        F: Fn(WatchEvent),
    {
        let mut iteration = self.start;

        loop {
            on_event(WatchEvent::build_started(iteration.next()));
            let action = match panic::catch_unwind(AssertUnwindSafe(&mut task)) {
                Ok(()) => {
                    iteration = iteration.next();
                    guarded(|| poll_cycle(iteration, source, &on_event))
                }
                Err(payload) => panicked(payload.as_ref()),
            };
            tracing::debug!(%iteration, %action, "watch cycle resolved");

            if let Action::Trigger = action {
                continue;
            }

            if let Action::HandleError(failure) = &action {
                tracing::warn!(%iteration, "watch stopped by error: {}", failure);
                on_event(WatchEvent::Error {
                    message: failure.to_string(),
                });
            }
            on_event(WatchEvent::terminated(&action, iteration));
            return WatchOutcome { action, iteration };
        }
    }
}

/// Run a watch session and return only its terminal action.
pub fn run_watch<T, S, N>(task: T, on_start: S, next_action: N) -> Action
where
    T: FnMut(),
    S: FnMut(Iteration) -> anyhow::Result<Action>,
    N: FnMut(Iteration) -> anyhow::Result<Action>,
{
    WatchLoop::new()
        .run(task, on_start, next_action, |_| {})
        .action
}

/// One polling phase. Never returns `Ignore`.
fn poll_cycle(
    iteration: Iteration,
    source: &mut dyn ActionSource,
    on_event: &dyn Fn(WatchEvent),
) -> Action {
    match source.on_start(iteration) {
        Ok(Action::Ignore) => {}
        Ok(action) => return action,
        Err(e) => return Action::HandleError(Failure::new(e)),
    }

    on_event(WatchEvent::waiting(iteration));
    loop {
        match source.next_action(iteration) {
            Ok(Action::Ignore) => continue,
            Ok(action) => return action,
            Err(e) => return Action::HandleError(Failure::new(e)),
        }
    }
}

fn guarded(f: impl FnOnce() -> Action) -> Action {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| panicked(payload.as_ref()))
}

fn panicked(payload: &(dyn Any + Send)) -> Action {
    Action::handle_error(TildeError::CallbackPanicked {
        message: panic_message(payload),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

struct Callbacks<S, N> {
    on_start: S,
    next_action: N,
}

impl<S, N> ActionSource for Callbacks<S, N>
where
    S: FnMut(Iteration) -> anyhow::Result<Action>,
    N: FnMut(Iteration) -> anyhow::Result<Action>,
{
    fn on_start(&mut self, iteration: Iteration) -> anyhow::Result<Action> {
        (self.on_start)(iteration)
    }

    fn next_action(&mut self, iteration: Iteration) -> anyhow::Result<Action> {
        (self.next_action)(iteration)
    }
}
