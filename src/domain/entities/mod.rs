//! Domain Entities
//!
//! - `Action` - Outcome of a watch decision, with its priority ordering
//! - `FileEvent` - A change notification from the file watcher

mod action;
mod file_event;

pub use action::{Action, ActionCategory, CustomCancel, Failure};
pub use file_event::{FileEvent, FileEventKind};
