//! Action entity - the outcome of one watch decision
//!
//! Every signal the watch loop sees (file event, keystroke, callback failure)
//! is reduced to an `Action`. Actions fall into two categories:
//!
//! - **Continue**: `Ignore`, `Trigger` keep the watch session alive
//! - **Cancel**: `Custom`, `HandleError`, `Run`, `CancelWatch`, `Reload` end it
//!
//! When several actions compete for the same tick, the one with the lowest
//! [`Action::rank`] wins:
//!
//! ```text
//! Custom > HandleError > Run > CancelWatch > Reload > Trigger > Ignore
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Coarse category of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    /// Keep watching (`Ignore`, `Trigger`)
    Continue,
    /// End the watch session
    Cancel,
}

/// Host-defined termination reason.
///
/// The watch engine never interprets a custom reason; it only ranks it above
/// every built-in action and hands it back to the host.
pub trait CustomCancel: fmt::Debug + Send + Sync {
    /// Short name used when reporting the termination
    fn name(&self) -> &str;
}

/// Opaque failure carried by [`Action::HandleError`].
///
/// Two failures are equal only when they are the same shared value.
#[derive(Clone)]
pub struct Failure(Arc<anyhow::Error>);

impl Failure {
    pub fn new(err: impl Into<anyhow::Error>) -> Self {
        Self(Arc::new(err.into()))
    }

    /// The underlying error, for logging
    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failure({:?})", self.0)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

/// Outcome of a watch decision.
#[derive(Debug, Clone)]
pub enum Action {
    /// Host-defined cancel reason, highest priority
    Custom(Arc<dyn CustomCancel>),
    /// An unrecoverable failure occurred while polling
    HandleError(Failure),
    /// Stop watching and splice these commands into the host queue
    Run(Vec<String>),
    /// Plain cancel with no follow-up
    CancelWatch,
    /// Stop watching, reload the build definition, resume watching
    Reload,
    /// Re-run the task now
    Trigger,
    /// Nothing to do, keep waiting
    Ignore,
}

impl Action {
    /// Build a `Run` action from any list of command strings
    pub fn run<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action::Run(commands.into_iter().map(Into::into).collect())
    }

    pub fn handle_error(err: impl Into<anyhow::Error>) -> Self {
        Action::HandleError(Failure::new(err))
    }

    pub fn custom(reason: impl CustomCancel + 'static) -> Self {
        Action::Custom(Arc::new(reason))
    }

    pub fn category(&self) -> ActionCategory {
        match self {
            Action::Ignore | Action::Trigger => ActionCategory::Continue,
            _ => ActionCategory::Cancel,
        }
    }

    /// Does this action end the watch session?
    pub fn is_cancel(&self) -> bool {
        self.category() == ActionCategory::Cancel
    }

    /// Priority rank, lower wins.
    pub fn rank(&self) -> u8 {
        match self {
            Action::Custom(_) => 0,
            Action::HandleError(_) => 1,
            Action::Run(_) => 2,
            Action::CancelWatch => 3,
            Action::Reload => 4,
            Action::Trigger => 5,
            Action::Ignore => 6,
        }
    }

    /// Priority comparison: `Less` means `self` takes precedence over `other`.
    ///
    /// Only the variant matters; payloads never break ties.
    pub fn compare(&self, other: &Action) -> Ordering {
        self.rank().cmp(&other.rank())
    }

    /// Stable snake_case name of the variant
    pub fn label(&self) -> &'static str {
        match self {
            Action::Custom(_) => "custom",
            Action::HandleError(_) => "handle_error",
            Action::Run(_) => "run",
            Action::CancelWatch => "cancel_watch",
            Action::Reload => "reload",
            Action::Trigger => "trigger",
            Action::Ignore => "ignore",
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Custom(a), Action::Custom(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Action::HandleError(a), Action::HandleError(b)) => a == b,
            (Action::Run(a), Action::Run(b)) => a == b,
            (Action::CancelWatch, Action::CancelWatch)
            | (Action::Reload, Action::Reload)
            | (Action::Trigger, Action::Trigger)
            | (Action::Ignore, Action::Ignore) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Custom(reason) => write!(f, "custom({})", reason.name()),
            Action::HandleError(failure) => write!(f, "error: {}", failure),
            Action::Run(commands) => write!(f, "run [{}]", commands.join("; ")),
            other => f.write_str(other.label()),
        }
    }
}
