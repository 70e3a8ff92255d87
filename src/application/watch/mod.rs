//! Watch Use Case
//!
//! Continuous build: run a task, wait for a reason to run it again, and
//! decide how the host resumes once watching stops.
//!
//! ## Architecture
//!
//! - `WatchLoop` - Runs the task and absorbs `Ignore`/`Trigger` decisions
//! - `TerminationHandler` - Rewrites the host command queue from the terminal action
//! - `WatchUseCase` - Live backend: notify, keyboard and shell runner
//! - `WatchEvent` - Progress events for human or NDJSON output
//!
//! ## Usage
//!
//! ```ignore
//! let outcome = WatchLoop::new().run(build, on_start, next_action, |event| { ... });
//! let state = TerminationHandler::new().on_termination(&outcome.action, "cargo build", outcome.iteration, state);
//! ```

mod driver;
mod event;
mod termination;
mod use_case;


pub use driver::{run_watch, WatchLoop, WatchOutcome};
pub use event::{WatchEvent, WatchOptions};
pub use termination::{parse_resume_command, TerminationHandler};
pub use use_case::WatchUseCase;
