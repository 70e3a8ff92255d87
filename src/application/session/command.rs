//! Host command vocabulary

use crate::application::watch::TerminationHandler;
use crate::domain::services::EXIT_COMMAND;
use crate::domain::value_objects::Iteration;

/// Watch a command: `~ cargo build`
pub const WATCH_PREFIX: char = '~';

/// Read the next command from the prompt when nothing else is queued
pub const IFLAST_SHELL: &str = "iflast shell";

/// Read the next command from the prompt
pub const SHELL: &str = "shell";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Start (or resume) watching `command`
    Watch { command: String, start: Iteration },
    /// Re-read configuration
    Reload,
    /// Stop the session
    Exit,
    /// Prompt for a command if the queue is otherwise empty
    IfLastShell,
    /// Prompt for a command
    Shell,
    /// Run a build command once
    Exec(String),
    /// Recognized directive with a malformed argument
    Invalid(String),
}

impl HostCommand {
    pub fn parse(line: &str, handler: &TerminationHandler) -> Self {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(WATCH_PREFIX) {
            let command = rest.trim();
            return if command.is_empty() {
                HostCommand::Invalid(line.to_string())
            } else {
                HostCommand::Watch {
                    command: command.to_string(),
                    start: Iteration::ZERO,
                }
            };
        }

        if let Some((start, command)) = handler.parse_resume_directive(line) {
            return HostCommand::Watch { command, start };
        }

        match line {
            l if l == handler.reload_command() => HostCommand::Reload,
            EXIT_COMMAND => HostCommand::Exit,
            IFLAST_SHELL => HostCommand::IfLastShell,
            SHELL => HostCommand::Shell,
            l if handler.is_resume_directive(l) => HostCommand::Invalid(l.to_string()),
            l => HostCommand::Exec(l.to_string()),
        }
    }

    /// Parse the command queued right after a reload.
    ///
    /// The resume directive there was written by the handler in force
    /// before the reload, so it is recognized even if the new
    /// configuration renamed it.
    pub fn parse_after_reload(
        line: &str,
        previous: &TerminationHandler,
        current: &TerminationHandler,
    ) -> Self {
        match previous.parse_resume_directive(line.trim()) {
            Some((start, command)) => HostCommand::Watch { command, start },
            None => HostCommand::parse(line, current),
        }
    }
}
