//! Session Use Case
//!
//! Drains the host command queue one command at a time. Watch commands hand
//! control to a [`WatchBackend`]; when the watch ends, the termination
//! handler decides what the queue looks like next.

use crate::application::watch::{TerminationHandler, WatchOutcome};
use crate::config::Config;
use crate::domain::ports::CommandRunner;
use crate::domain::value_objects::Iteration;
use crate::error::TildeResult;

use super::command::HostCommand;
use super::state::SessionState;

/// Runs one watch session for a command.
pub trait WatchBackend {
    /// Watch `command`, counting task executions from `start`.
    fn watch(&mut self, command: &str, start: Iteration) -> WatchOutcome;

    /// Re-read configuration and return it
    fn reload(&mut self) -> TildeResult<Config>;
}

/// Interactive prompt used by `shell` and `iflast shell`.
pub trait ShellPrompt {
    /// `None` on end of input
    fn read_command(&mut self) -> Option<String>;
}

/// Prompt that never yields a command.
pub struct NoPrompt;

impl ShellPrompt for NoPrompt {
    fn read_command(&mut self) -> Option<String> {
        None
    }
}

/// Host command loop.
pub struct Session<'a> {
    runner: &'a dyn CommandRunner,
    watcher: &'a mut dyn WatchBackend,
    prompt: &'a mut dyn ShellPrompt,
    handler: TerminationHandler,
    /// Handler replaced by the last reload; it still owns the resume
    /// directive queued right behind that reload.
    retired: Option<TerminationHandler>,
}

impl<'a> Session<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        watcher: &'a mut dyn WatchBackend,
        prompt: &'a mut dyn ShellPrompt,
    ) -> Self {
        Self {
            runner,
            watcher,
            prompt,
            handler: TerminationHandler::new(),
            retired: None,
        }
    }

    pub fn with_handler(mut self, handler: TerminationHandler) -> Self {
        self.handler = handler;
        self
    }

    /// Process commands until the queue is empty or `exit` runs.
    pub fn run(&mut self, mut state: SessionState) -> SessionState {
        while let Some(line) = state.pop_front() {
            tracing::debug!(command = %line, "session command");

            let command = match self.retired.take() {
                Some(old) => HostCommand::parse_after_reload(&line, &old, &self.handler),
                None => HostCommand::parse(&line, &self.handler),
            };

            match command {
                HostCommand::Watch { command, start } => {
                    let outcome = self.watcher.watch(&command, start);
                    tracing::info!(
                        command = %command,
                        iteration = %outcome.iteration,
                        "watch ended: {}",
                        outcome.action
                    );
                    state = self.handler.on_termination(
                        &outcome.action,
                        &command,
                        outcome.iteration,
                        state,
                    );
                }
                HostCommand::Reload => match self.watcher.reload() {
                    Ok(config) => {
                        let reloaded = TerminationHandler::from(&config.termination);
                        self.retired = Some(std::mem::replace(&mut self.handler, reloaded));
                    }
                    Err(e) => {
                        tracing::warn!("reload failed: {}", e);
                        state.mark_failed();
                    }
                },
                HostCommand::Exit => {
                    state.mark_exited();
                    break;
                }
                HostCommand::IfLastShell => {
                    if state.is_empty() {
                        self.prompt_into(&mut state);
                    }
                }
                HostCommand::Shell => self.prompt_into(&mut state),
                HostCommand::Exec(command) => match self.runner.run(&command) {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::warn!(command = %command, "command failed");
                        state.mark_failed();
                    }
                    Err(e) => {
                        tracing::warn!(command = %command, "could not run command: {}", e);
                        state.mark_failed();
                    }
                },
                HostCommand::Invalid(line) => {
                    tracing::warn!("malformed command '{}'", line);
                    state.mark_failed();
                }
            }
        }

        state
    }

    fn prompt_into(&mut self, state: &mut SessionState) {
        match self.prompt.read_command() {
            Some(line) if !line.trim().is_empty() => state.push_back(line),
            // An empty line just prompts again
            Some(_) => state.push_back(super::command::SHELL),
            None => {}
        }
    }
}
