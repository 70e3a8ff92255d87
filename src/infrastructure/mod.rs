//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `events/` - File watching, ignore filtering and debouncing
//! - `input/` - Keyboard reader and Ctrl+C relay
//! - `source` - Channel-backed `ActionSource`
//! - `runner` - Shell `CommandRunner`

pub mod events;
pub mod input;
pub mod runner;
pub mod source;

pub use events::{DebounceGate, IgnoreFilter, NotifyEventSource};
pub use input::{InterruptRelay, KeyboardReader};
pub use runner::ShellRunner;
pub use source::{ChannelActionSource, Signal};
