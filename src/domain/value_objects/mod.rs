//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod fingerprint;
mod iteration;

pub use fingerprint::Fingerprint;
pub use iteration::Iteration;
