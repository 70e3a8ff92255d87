//! Debounce gate
//!
//! Sits between the raw file watcher and the trigger policy. Two rules:
//!
//! - anti-entropy: a path that just triggered a build cannot trigger again
//!   until the window has passed
//! - deletion quarantine: a deletion is held back briefly so that an
//!   editor's delete-then-create save collapses into one replace
//!
//! Time is passed in explicitly so the gate can be driven from tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::domain::entities::{FileEvent, FileEventKind};
use crate::domain::policies::DebounceSettings;

#[derive(Debug)]
struct Quarantined {
    event: FileEvent,
    since: Instant,
}

/// Debounce state for one watch session.
#[derive(Debug)]
pub struct DebounceGate {
    settings: DebounceSettings,
    last_trigger: HashMap<PathBuf, Instant>,
    quarantine: HashMap<PathBuf, Quarantined>,
}

impl DebounceGate {
    pub fn new(settings: DebounceSettings) -> Self {
        Self {
            settings,
            last_trigger: HashMap::new(),
            quarantine: HashMap::new(),
        }
    }

    /// Feed one raw event; returns whatever is ready to be classified.
    pub fn offer(&mut self, event: FileEvent, now: Instant) -> Vec<FileEvent> {
        match event.kind() {
            FileEventKind::Deletion if !self.settings.deletion_quarantine.is_zero() => {
                // A repeated deletion keeps the original deadline.
                self.quarantine
                    .entry(event.path().to_path_buf())
                    .or_insert(Quarantined { event, since: now });
                Vec::new()
            }
            FileEventKind::Creation => match self.quarantine.remove(event.path()) {
                Some(held) => self.pass(replace(held.event, event), now),
                None => self.pass(event, now),
            },
            _ => {
                // A later update supersedes a pending deletion of the same path.
                self.quarantine.remove(event.path());
                self.pass(event, now)
            }
        }
    }

    /// Release deletions whose quarantine has expired and forget old triggers.
    pub fn flush(&mut self, now: Instant) -> Vec<FileEvent> {
        let window = self.settings.deletion_quarantine;
        let expired: Vec<PathBuf> = self
            .quarantine
            .iter()
            .filter(|(_, held)| now.saturating_duration_since(held.since) >= window)
            .map(|(path, _)| path.clone())
            .collect();

        let mut released = Vec::new();
        for path in expired {
            if let Some(held) = self.quarantine.remove(&path) {
                released.extend(self.pass(held.event, now));
            }
        }

        let retention = self.settings.anti_entropy_retention;
        self.last_trigger
            .retain(|_, at| now.saturating_duration_since(*at) < retention);

        released
    }

    /// Record that `path` caused a build at `now`.
    pub fn note_trigger(&mut self, path: &Path, now: Instant) {
        self.last_trigger.insert(path.to_path_buf(), now);
    }

    /// Earliest moment a quarantined deletion becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.quarantine
            .values()
            .map(|held| held.since + self.settings.deletion_quarantine)
            .min()
    }

    pub fn pending_deletions(&self) -> usize {
        self.quarantine.len()
    }

    pub fn tracked_paths(&self) -> usize {
        self.last_trigger.len()
    }

    fn pass(&self, event: FileEvent, now: Instant) -> Vec<FileEvent> {
        if self.is_suppressed(event.path(), now) {
            tracing::trace!(path = %event.path().display(), "suppressed by anti-entropy");
            return Vec::new();
        }
        vec![event]
    }

    fn is_suppressed(&self, path: &Path, now: Instant) -> bool {
        self.last_trigger
            .get(path)
            .is_some_and(|at| now.saturating_duration_since(*at) < self.settings.anti_entropy)
    }
}

/// Merge a quarantined deletion with the creation that followed it.
///
/// With both fingerprints known the pair becomes an update, so identical
/// content survives as a no-op; otherwise the creation stands on its own.
fn replace(deleted: FileEvent, created: FileEvent) -> FileEvent {
    match (deleted.before(), created.after()) {
        (Some(before), Some(after)) => {
            FileEvent::updated(created.path().to_path_buf(), before.clone(), after.clone())
        }
        _ => created,
    }
}

/// Remaining time until `deadline`, zero once it has passed.
pub fn until(deadline: Instant, now: Instant) -> Duration {
    deadline.saturating_duration_since(now)
}
