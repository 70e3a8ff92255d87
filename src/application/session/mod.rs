//! Session Use Case
//!
//! The host side of a continuous build: an ordered queue of command lines,
//! processed until it drains. `~ <cmd>` lines start watch sessions.

mod command;
mod state;
mod use_case;


pub use command::{HostCommand, IFLAST_SHELL, SHELL, WATCH_PREFIX};
pub use state::SessionState;
pub use use_case::{NoPrompt, Session, ShellPrompt, WatchBackend};
