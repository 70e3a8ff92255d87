//! Command Queue Port
//!
//! The host build tool owns its pending-command queue. The watch engine only
//! reads it once when a session ends and hands back a replacement.

/// Host state that carries an ordered queue of pending command lines.
pub trait CommandQueue: Sized {
    /// Commands still waiting to run, in execution order
    fn remaining_commands(&self) -> &[String];

    /// Replace the pending queue
    fn with_commands(self, commands: Vec<String>) -> Self;

    /// Mark the host state as failed
    fn fail(self) -> Self;
}
