//! Presentation Layer
//!
//! CLI argument parsing (via clap). Rendering lives with the binary in
//! `ui`, since it is the only consumer.

pub mod cli;

pub use cli::{Cli, ColorWhen, Commands};
