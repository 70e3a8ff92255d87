//! Debounce Policy
//!
//! Timing constants consumed by the event source. The watch loop itself
//! never sleeps; these bound how eagerly raw file events become actions.

use std::time::Duration;

/// Minimum spacing between two triggers attributed to the same path.
pub const DEFAULT_ANTI_ENTROPY: Duration = Duration::from_millis(500);

/// How long a path's last-trigger timestamp is remembered.
pub const DEFAULT_ANTI_ENTROPY_RETENTION: Duration = Duration::from_secs(10 * 60);

/// How long a deletion is held back waiting for a matching creation.
pub const DEFAULT_DELETION_QUARANTINE: Duration = Duration::from_millis(50);

/// Debounce timing, overridable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceSettings {
    pub anti_entropy: Duration,
    pub anti_entropy_retention: Duration,
    pub deletion_quarantine: Duration,
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            anti_entropy: DEFAULT_ANTI_ENTROPY,
            anti_entropy_retention: DEFAULT_ANTI_ENTROPY_RETENTION,
            deletion_quarantine: DEFAULT_DELETION_QUARANTINE,
        }
    }
}

impl DebounceSettings {
    pub fn with_anti_entropy(mut self, window: Duration) -> Self {
        self.anti_entropy = window;
        self
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.anti_entropy_retention = retention;
        self
    }

    pub fn with_deletion_quarantine(mut self, quarantine: Duration) -> Self {
        self.deletion_quarantine = quarantine;
        self
    }
}
