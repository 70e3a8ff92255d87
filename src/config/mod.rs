//! Configuration module for Tilde
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TILDE_*)
//! 3. Project config (.tilde/config.toml)
//! 4. User config (<config dir>/tilde/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG};
pub use types::{
    CliOverrides, ColorMode, Config, OutputConfig, TerminationConfig, WatchConfig, DEFAULT_RELOAD_COMMAND,
    DEFAULT_RESUME_COMMAND,
};
