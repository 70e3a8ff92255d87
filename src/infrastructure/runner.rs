//! Shell command runner
//!
//! Runs each command line through the platform shell with inherited stdio,
//! so build output streams straight to the terminal.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::domain::ports::CommandRunner;
use crate::error::TildeResult;

/// [`CommandRunner`] that spawns `sh -c` (`cmd /C` on Windows).
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    working_dir: Option<PathBuf>,
    quiet: bool,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Discard the command's stdout (used with `--json` to keep the stream parseable)
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn command(&self, line: &str) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(line);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        };
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        if self.quiet {
            cmd.stdout(Stdio::null());
        }
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> TildeResult<bool> {
        tracing::debug!(command, "spawning");
        let status = self.command(command).status()?;
        tracing::debug!(command, code = ?status.code(), "finished");
        Ok(status.success())
    }
}
