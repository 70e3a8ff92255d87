//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod action_source;
pub mod command_queue;
pub mod command_runner;

pub use action_source::ActionSource;
pub use command_queue::CommandQueue;
pub use command_runner::{CommandRunner, RecordingRunner};
