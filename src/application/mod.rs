//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain decision rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `WatchLoop` - Runs a build task until a cancel decision arrives
//! - `TerminationHandler` - Rewrites the host queue after a watch session
//! - `Session` - Processes the host command queue, starting watches as needed

pub mod session;
pub mod watch;

pub use session::{Session, SessionState, ShellPrompt, WatchBackend};
pub use watch::{
    run_watch, TerminationHandler, WatchEvent, WatchLoop, WatchOptions, WatchOutcome, WatchUseCase,
};
