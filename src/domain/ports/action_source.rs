//! Action Source Port
//!
//! Where the watch loop gets its decisions from. Implementations block until
//! a signal is available and return exactly one action per call.

use crate::domain::entities::Action;
use crate::domain::value_objects::Iteration;

/// Supplies actions to the watch loop.
///
/// Errors are not fatal to the caller: the loop turns them into
/// `Action::HandleError`.
pub trait ActionSource {
    /// Called once per watch cycle, right after the task ran.
    fn on_start(&mut self, iteration: Iteration) -> anyhow::Result<Action>;

    /// Called repeatedly while idle; blocks until a signal arrives.
    fn next_action(&mut self, iteration: Iteration) -> anyhow::Result<Action>;
}
