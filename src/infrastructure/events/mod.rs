//! File event plumbing
//!
//! - `filter` - gitignore-style exclusion of watched paths
//! - `gate` - anti-entropy and deletion quarantine
//! - `notify_source` - notify subscription producing `FileEvent`s

pub mod filter;
pub mod gate;
mod notify_source;

pub use filter::IgnoreFilter;
pub use gate::DebounceGate;
pub use notify_source::{FingerprintTracker, NotifyEventSource};
