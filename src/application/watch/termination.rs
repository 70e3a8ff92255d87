//! Termination handler
//!
//! Turns the terminal action of a watch session into a new pending-command
//! queue for the host. Stale resume directives are always filtered out first
//! so they cannot pile up across reloads.

use crate::config::{TerminationConfig, DEFAULT_RELOAD_COMMAND, DEFAULT_RESUME_COMMAND};
use crate::domain::entities::Action;
use crate::domain::ports::CommandQueue;
use crate::domain::value_objects::Iteration;

/// Rewrites the host command queue when a watch session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationHandler {
    resume_prefixes: Vec<String>,
    reload_command: String,
    resume_command: String,
}

impl Default for TerminationHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminationHandler {
    pub fn new() -> Self {
        Self {
            resume_prefixes: vec![DEFAULT_RESUME_COMMAND.to_string()],
            reload_command: DEFAULT_RELOAD_COMMAND.to_string(),
            resume_command: DEFAULT_RESUME_COMMAND.to_string(),
        }
    }

    pub fn with_resume_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resume_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reload_command(mut self, command: impl Into<String>) -> Self {
        self.reload_command = command.into();
        self
    }

    pub fn with_resume_command(mut self, command: impl Into<String>) -> Self {
        self.resume_command = command.into();
        self
    }

    pub fn reload_command(&self) -> &str {
        &self.reload_command
    }

    /// Directive that restarts watching `command` with the counter at `iteration`
    pub fn resume_directive(&self, iteration: Iteration, command: &str) -> String {
        format!("{} {} {}", self.resume_command, iteration, command)
    }

    /// Decode a directive produced by [`resume_directive`](Self::resume_directive)
    pub fn parse_resume_directive(&self, line: &str) -> Option<(Iteration, String)> {
        parse_resume_command(line, &self.resume_command)
    }

    /// Does `line` look like a resume directive, well-formed or not?
    pub fn is_resume_directive(&self, line: &str) -> bool {
        line.strip_prefix(self.resume_command.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
    }

    /// Drop every command that starts with a resume prefix
    pub fn filter(&self, commands: &[String]) -> Vec<String> {
        commands
            .iter()
            .filter(|c| !self.resume_prefixes.iter().any(|p| c.starts_with(p.as_str())))
            .cloned()
            .collect()
    }

    /// Build the host state that follows a watch session.
    pub fn on_termination<S: CommandQueue>(
        &self,
        action: &Action,
        command: &str,
        iteration: Iteration,
        state: S,
    ) -> S {
        let filtered = self.filter(state.remaining_commands());

        match action {
            Action::Run(commands) => {
                let mut queue = commands.clone();
                queue.extend(filtered);
                state.with_commands(queue)
            }
            Action::Reload => {
                let mut queue = vec![
                    self.reload_command.clone(),
                    self.resume_directive(iteration, command),
                ];
                queue.extend(filtered);
                state.with_commands(queue)
            }
            Action::HandleError(_) => state.with_commands(filtered).fail(),
            _ => state.with_commands(filtered),
        }
    }
}

impl From<&TerminationConfig> for TerminationHandler {
    fn from(config: &TerminationConfig) -> Self {
        Self::new()
            .with_resume_prefixes(config.resume_prefixes.iter().cloned())
            .with_reload_command(config.reload_command.clone())
            .with_resume_command(config.resume_command.clone())
    }
}

/// Split `"<prefix> <iteration> <command>"` into its parts.
pub fn parse_resume_command(line: &str, prefix: &str) -> Option<(Iteration, String)> {
    let rest = line.strip_prefix(prefix)?.strip_prefix(' ')?;
    let (count, command) = rest.trim_start().split_once(' ')?;
    let count: u32 = count.parse().ok()?;
    let command = command.trim();
    if command.is_empty() {
        return None;
    }
    Some((Iteration::new(count), command.to_string()))
}
