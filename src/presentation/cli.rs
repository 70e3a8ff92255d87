//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose) are inherited by all subcommands
//! - `watch` is sugar for `run "~ <CMD>"`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::session::WATCH_PREFIX;
use crate::config::{CliOverrides, ColorMode};
use crate::domain::policies::TriggerMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// Tilde - continuous build runner
#[derive(Parser, Debug)]
#[command(name = "tilde")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "While watching: Enter returns to the prompt, 'r' rebuilds, 'x' exits.")]
pub struct Cli {
    /// Output progress as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-run a command whenever watched files change
    Watch {
        /// Path to watch (repeatable; defaults to the configured paths)
        #[arg(short, long = "path", value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Rebuild on every file event, even when content is unchanged
        #[arg(long)]
        always: bool,

        /// Do not read keystrokes from the terminal
        #[arg(long)]
        no_input: bool,

        /// Command to run, e.g. `cargo build`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Process a queue of commands; `~ <cmd>` entries start watching
    Run {
        /// Do not read keystrokes from the terminal
        #[arg(long)]
        no_input: bool,

        /// Commands, executed in order
        #[arg(required = true)]
        commands: Vec<String>,
    },
}

impl Cli {
    /// The initial command queue for the session
    pub fn queue(&self) -> Vec<String> {
        match &self.command {
            Commands::Watch { command, .. } => {
                vec![format!("{} {}", WATCH_PREFIX, command.join(" "))]
            }
            Commands::Run { commands, .. } => commands.clone(),
        }
    }

    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            color: self.color.map(ColorMode::from),
            ..CliOverrides::default()
        };
        if let Commands::Watch { paths, always, .. } = &self.command {
            overrides.paths = paths.clone();
            if *always {
                overrides.trigger = Some(TriggerMode::Always);
            }
        }
        overrides
    }

    pub fn reads_input(&self) -> bool {
        match &self.command {
            Commands::Watch { no_input, .. } | Commands::Run { no_input, .. } => !no_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_watch() {
        let cli = Cli::try_parse_from(["tilde", "watch", "cargo", "build"]).unwrap();
        assert_eq!(cli.queue(), vec!["~ cargo build".to_string()]);
        assert!(cli.reads_input());
        assert_eq!(cli.overrides(), CliOverrides::default());
    }

    #[test]
    fn test_cli_watch_passes_hyphen_args_through() {
        let cli =
            Cli::try_parse_from(["tilde", "watch", "cargo", "test", "--", "--nocapture"]).unwrap();
        assert_eq!(cli.queue(), vec!["~ cargo test -- --nocapture".to_string()]);
    }

    #[test]
    fn test_cli_watch_options() {
        let cli = Cli::try_parse_from([
            "tilde", "watch", "--path", "src", "-p", "tests", "--always", "--no-input", "make",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.paths, vec![PathBuf::from("src"), PathBuf::from("tests")]);
        assert_eq!(overrides.trigger, Some(TriggerMode::Always));
        assert!(!cli.reads_input());
    }

    #[test]
    fn test_cli_watch_requires_command() {
        assert!(Cli::try_parse_from(["tilde", "watch"]).is_err());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::try_parse_from(["tilde", "run", "cargo fmt", "~ cargo test"]).unwrap();
        assert_eq!(
            cli.queue(),
            vec!["cargo fmt".to_string(), "~ cargo test".to_string()]
        );
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["tilde", "watch", "--json", "-vv", "make"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_color_flag() {
        let cli = Cli::try_parse_from(["tilde", "--color", "never", "run", "true"]).unwrap();
        assert!(matches!(cli.color, Some(ColorWhen::Never)));
        assert_eq!(cli.overrides().color, Some(ColorMode::Never));
    }
}
