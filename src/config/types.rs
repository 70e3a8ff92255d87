//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::policies::{debounce, DebounceSettings, TriggerMode};
use crate::domain::services::DEFAULT_CANCEL_COMMAND;
use crate::error::TildeResult;

use super::loader::{self, ConfigWarning};

/// Directive that asks the host to reload its build definition
pub const DEFAULT_RELOAD_COMMAND: &str = "reload";

/// Directive that resumes a watch session after a reload
pub const DEFAULT_RESUME_COMMAND: &str = "__resume-watch";

/// Watch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Roots to watch recursively
    #[serde(default = "default_paths")]
    pub paths: Vec<PathBuf>,

    /// Gitignore-style patterns excluded from watching
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Files whose change ends the watch with a reload, then resumes it.
    /// Tracked even when `ignore` covers them.
    #[serde(default = "default_reload_on")]
    pub reload_on: Vec<PathBuf>,

    #[serde(default = "default_anti_entropy_ms")]
    pub anti_entropy_ms: u64,

    #[serde(default = "default_retention_secs")]
    pub anti_entropy_retention_secs: u64,

    #[serde(default = "default_quarantine_ms")]
    pub deletion_quarantine_ms: u64,

    #[serde(default)]
    pub trigger: TriggerMode,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            ignore: default_ignore(),
            reload_on: default_reload_on(),
            anti_entropy_ms: default_anti_entropy_ms(),
            anti_entropy_retention_secs: default_retention_secs(),
            deletion_quarantine_ms: default_quarantine_ms(),
            trigger: TriggerMode::default(),
        }
    }
}

impl WatchConfig {
    /// Debounce timing as consumed by the event source
    pub fn debounce(&self) -> DebounceSettings {
        DebounceSettings::default()
            .with_anti_entropy(Duration::from_millis(self.anti_entropy_ms))
            .with_retention(Duration::from_secs(self.anti_entropy_retention_secs))
            .with_deletion_quarantine(Duration::from_millis(self.deletion_quarantine_ms))
    }
}

fn default_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

fn default_ignore() -> Vec<String> {
    vec![
        "target/".to_string(),
        ".git/".to_string(),
        ".tilde/".to_string(),
    ]
}

fn default_reload_on() -> Vec<PathBuf> {
    vec![PathBuf::from(loader::PROJECT_CONFIG)]
}

fn default_anti_entropy_ms() -> u64 {
    debounce::DEFAULT_ANTI_ENTROPY.as_millis() as u64
}

fn default_retention_secs() -> u64 {
    debounce::DEFAULT_ANTI_ENTROPY_RETENTION.as_secs()
}

fn default_quarantine_ms() -> u64 {
    debounce::DEFAULT_DELETION_QUARANTINE.as_millis() as u64
}

/// How a finished watch session rewrites the pending command queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationConfig {
    /// Pending commands starting with one of these are dropped
    #[serde(default = "default_resume_prefixes")]
    pub resume_prefixes: Vec<String>,

    #[serde(default = "default_reload_command")]
    pub reload_command: String,

    #[serde(default = "default_resume_command")]
    pub resume_command: String,

    /// Queued when Enter is pressed during a watch
    #[serde(default = "default_cancel_command")]
    pub cancel_command: String,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            resume_prefixes: default_resume_prefixes(),
            reload_command: default_reload_command(),
            resume_command: default_resume_command(),
            cancel_command: default_cancel_command(),
        }
    }
}

fn default_resume_prefixes() -> Vec<String> {
    vec![DEFAULT_RESUME_COMMAND.to_string()]
}

fn default_reload_command() -> String {
    DEFAULT_RELOAD_COMMAND.to_string()
}

fn default_resume_command() -> String {
    DEFAULT_RESUME_COMMAND.to_string()
}

fn default_cancel_command() -> String {
    DEFAULT_CANCEL_COMMAND.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub termination: TerminationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> TildeResult<Self> {
        let (config, warnings) = loader::load_with_warnings(path)?;
        for warning in &warnings {
            match &warning.suggestion {
                Some(suggestion) => tracing::warn!(
                    file = %warning.file.display(),
                    line = ?warning.line,
                    "unknown config key '{}' (did you mean '{}'?)",
                    warning.key,
                    suggestion
                ),
                None => tracing::warn!(
                    file = %warning.file.display(),
                    line = ?warning.line,
                    "unknown config key '{}'",
                    warning.key
                ),
            }
        }
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> TildeResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (TILDE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Project config, env overrides, then command-line flags.
    ///
    /// Unlike [`load_or_default`](Self::load_or_default), a broken project
    /// config is an error here; used when reloading mid-session.
    pub fn reload(project_root: &Path, overrides: &CliOverrides) -> TildeResult<Self> {
        let project = project_root.join(loader::PROJECT_CONFIG);
        let config = if project.exists() {
            Self::load(&project)?.with_env_overrides()
        } else {
            Self::load_or_default(Some(project_root))
        };
        Ok(overrides.apply(config))
    }
}

/// Settings given on the command line; they win over every config source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub paths: Vec<PathBuf>,
    pub trigger: Option<TriggerMode>,
    pub color: Option<ColorMode>,
}

impl CliOverrides {
    pub fn apply(&self, mut config: Config) -> Config {
        if !self.paths.is_empty() {
            config.watch.paths = self.paths.clone();
        }
        if let Some(trigger) = self.trigger {
            config.watch.trigger = trigger;
        }
        if let Some(color) = self.color {
            config.output.color = color;
        }
        config
    }
}
