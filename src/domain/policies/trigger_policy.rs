//! Trigger Policy
//!
//! Maps a file event (plus the current iteration) to an [`Action`].
//! Policies are pure: no I/O, no clocks, no state.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Action, FileEvent};
use crate::domain::value_objects::Iteration;

/// Decides what a single file event means for the watch session.
pub trait TriggerPolicy: Send + Sync {
    fn decide(&self, iteration: Iteration, event: &FileEvent) -> Action;
}

impl<F> TriggerPolicy for F
where
    F: Fn(Iteration, &FileEvent) -> Action + Send + Sync,
{
    fn decide(&self, iteration: Iteration, event: &FileEvent) -> Action {
        self(iteration, event)
    }
}

/// Rebuild on any event.
pub fn trigger(_iteration: Iteration, _event: &FileEvent) -> Action {
    Action::Trigger
}

/// Return `action` for creations, deletions and real edits; `Ignore` for an
/// update whose content fingerprint did not move.
pub fn if_changed(action: Action) -> impl Fn(Iteration, &FileEvent) -> Action + Send + Sync + Clone {
    move |_iteration, event| {
        if event.is_content_change() {
            action.clone()
        } else {
            Action::Ignore
        }
    }
}

/// Built-in policy selection, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Trigger only when content changed
    #[default]
    Changed,
    /// Trigger on every event
    Always,
}

impl TriggerMode {
    pub fn policy(self) -> Box<dyn TriggerPolicy> {
        match self {
            TriggerMode::Changed => Box::new(if_changed(Action::Trigger)),
            TriggerMode::Always => Box::new(trigger),
        }
    }

    /// Parse a user-supplied mode name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "changed" | "if-changed" | "if_changed" => Some(TriggerMode::Changed),
            "always" | "any" => Some(TriggerMode::Always),
            _ => None,
        }
    }
}
