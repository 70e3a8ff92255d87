//! Watch event types and options

use std::path::PathBuf;

use crate::config::{CliOverrides, Config};
use crate::domain::entities::{Action, FileEvent, FileEventKind};
use crate::domain::value_objects::Iteration;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root (relative watch paths resolve against it)
    pub project_root: PathBuf,
    /// Config
    pub config: Config,
    /// Command-line settings reapplied on every reload
    pub overrides: CliOverrides,
    /// Read keystrokes from the terminal
    pub interactive: bool,
}

impl WatchOptions {
    /// Create new watch options with minimal required fields
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config: Config::default(),
            overrides: CliOverrides::default(),
            interactive: true,
        }
    }

    /// Set config
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set command-line overrides
    pub fn with_overrides(mut self, overrides: CliOverrides) -> Self {
        self.config = overrides.apply(self.config);
        self.overrides = overrides;
        self
    }

    /// Enable or disable keyboard input
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Watch roots, resolved against the project root
    pub fn watch_paths(&self) -> Vec<PathBuf> {
        self.resolve(&self.config.watch.paths)
    }

    /// Files that trigger a reload, resolved against the project root
    pub fn reload_files(&self) -> Vec<PathBuf> {
        self.resolve(&self.config.watch.reload_on)
    }

    fn resolve(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths
            .iter()
            .map(|p| {
                if p.is_absolute() {
                    p.clone()
                } else {
                    self.project_root.join(p)
                }
            })
            .collect()
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        watched_command: String,
        iteration: u32,
        watching: Vec<String>,
    },
    /// Build task is about to run
    BuildStarted { iteration: u32 },
    /// Build task returned
    BuildComplete { iteration: u32, success: bool },
    /// Idle, waiting for the next signal
    Waiting { iteration: u32 },
    /// File changed
    FileChanged { path: String, kind: String },
    /// Watch session ended
    WatchTerminated { action: String, iteration: u32 },
    /// Error occurred
    Error { message: String },
}

impl WatchEvent {
    pub fn build_started(iteration: Iteration) -> Self {
        WatchEvent::BuildStarted {
            iteration: iteration.get(),
        }
    }

    pub fn waiting(iteration: Iteration) -> Self {
        WatchEvent::Waiting {
            iteration: iteration.get(),
        }
    }

    pub fn file_changed(event: &FileEvent) -> Self {
        let kind = match event.kind() {
            FileEventKind::Creation => "created",
            FileEventKind::Deletion => "deleted",
            FileEventKind::Update => "updated",
        };
        WatchEvent::FileChanged {
            path: event.path().display().to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn terminated(action: &Action, iteration: Iteration) -> Self {
        WatchEvent::WatchTerminated {
            action: action.label().to_string(),
            iteration: iteration.get(),
        }
    }

    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
