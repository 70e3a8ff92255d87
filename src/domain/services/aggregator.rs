//! Aggregator
//!
//! Several signals can land in the same polling tick (an editor saving a
//! batch of files, a keystroke racing a file event). The aggregator keeps
//! the single most important one.

use crate::domain::entities::Action;

/// Pick the highest-priority `(Action, trigger)` pair.
///
/// Returns `None` for an empty tick. Among actions of equal rank the
/// earliest one wins, so the result is reproducible for a given burst.
pub fn aggregate<E, I>(candidates: I) -> Option<(Action, E)>
where
    I: IntoIterator<Item = (Action, E)>,
{
    // `min_by` keeps the first of several equal minima.
    candidates
        .into_iter()
        .min_by(|(a, _), (b, _)| a.compare(b))
}
