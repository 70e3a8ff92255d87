//! Domain Policies
//!
//! Rules that turn raw observations into watch decisions.
//! These are pure functions and plain values.

pub mod debounce;
mod trigger_policy;

pub use debounce::DebounceSettings;
pub use trigger_policy::{if_changed, trigger, TriggerMode, TriggerPolicy};
