//! Tilde - continuous build runner
//!
//! Tilde runs a build command, waits for a reason to run it again (a source
//! change, a keystroke) and, once watching stops, tells the host which
//! commands to execute next.
//!
//! ## Layers
//!
//! - `domain` - actions, policies, aggregation and ports; no I/O
//! - `application` - the watch loop, termination handler and host session
//! - `infrastructure` - notify, keyboard, Ctrl+C and shell adapters
//! - `config` - TOML configuration with env and CLI overrides
//! - `presentation` - CLI definition

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    run_watch, Session, SessionState, TerminationHandler, WatchEvent, WatchLoop, WatchOutcome,
};
pub use config::Config;
pub use domain::entities::{Action, ActionCategory, FileEvent, FileEventKind};
pub use domain::policies::{if_changed, trigger, TriggerMode};
pub use domain::services::{aggregate, parse_input};
pub use domain::value_objects::Iteration;
pub use error::{TildeError, TildeResult};
