//! Session state - the host's pending-command queue

use crate::domain::ports::CommandQueue;

/// Pending commands plus the session's success flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    remaining: Vec<String>,
    failed: bool,
    exited: bool,
}

impl SessionState {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            remaining: commands.into_iter().map(Into::into).collect(),
            failed: false,
            exited: false,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Take the next command off the front of the queue
    pub(crate) fn pop_front(&mut self) -> Option<String> {
        if self.remaining.is_empty() {
            None
        } else {
            Some(self.remaining.remove(0))
        }
    }

    pub(crate) fn push_back(&mut self, command: impl Into<String>) {
        self.remaining.push(command.into());
    }

    pub(crate) fn mark_exited(&mut self) {
        self.exited = true;
    }

    pub(crate) fn mark_failed(&mut self) {
        self.failed = true;
    }
}

impl CommandQueue for SessionState {
    fn remaining_commands(&self) -> &[String] {
        &self.remaining
    }

    fn with_commands(self, commands: Vec<String>) -> Self {
        Self {
            remaining: commands,
            ..self
        }
    }

    fn fail(self) -> Self {
        Self {
            failed: true,
            ..self
        }
    }
}
