//! Command Runner Port
//!
//! Executes one build command on behalf of the host session.

use crate::error::TildeResult;

/// Runs a command line and reports whether it succeeded.
pub trait CommandRunner {
    /// `Ok(false)` means the command ran and failed; `Err` means it could not
    /// be started at all.
    fn run(&self, command: &str) -> TildeResult<bool>;
}

/// Runner that records commands instead of executing them.
///
/// Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: std::sync::Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report failure for commands equal to `command`
    pub fn failing_on(command: impl Into<String>) -> Self {
        Self {
            commands: Default::default(),
            fail_on: Some(command.into()),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str) -> TildeResult<bool> {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command.to_string());
        }
        Ok(self.fail_on.as_deref() != Some(command))
    }
}
