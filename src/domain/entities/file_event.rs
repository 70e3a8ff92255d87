//! FileEvent entity - a change notification from the file watcher

use std::path::{Path, PathBuf};

use crate::domain::value_objects::Fingerprint;

/// What happened to a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileEventKind {
    Creation,
    Deletion,
    Update,
}

/// A single file-system change.
///
/// Update events always carry both the previous and current fingerprint so
/// a metadata-only touch can be told apart from an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    kind: FileEventKind,
    path: PathBuf,
    before: Option<Fingerprint>,
    after: Option<Fingerprint>,
}

impl FileEvent {
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: FileEventKind::Creation,
            path: path.into(),
            before: None,
            after: None,
        }
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: FileEventKind::Deletion,
            path: path.into(),
            before: None,
            after: None,
        }
    }

    pub fn updated(path: impl Into<PathBuf>, before: Fingerprint, after: Fingerprint) -> Self {
        Self {
            kind: FileEventKind::Update,
            path: path.into(),
            before: Some(before),
            after: Some(after),
        }
    }

    /// Attach the fingerprint the path had before this event
    pub fn with_before(mut self, fingerprint: Fingerprint) -> Self {
        self.before = Some(fingerprint);
        self
    }

    /// Attach the fingerprint the path has after this event
    pub fn with_after(mut self, fingerprint: Fingerprint) -> Self {
        self.after = Some(fingerprint);
        self
    }

    pub fn kind(&self) -> FileEventKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn before(&self) -> Option<&Fingerprint> {
        self.before.as_ref()
    }

    pub fn after(&self) -> Option<&Fingerprint> {
        self.after.as_ref()
    }

    /// Did the content change?
    ///
    /// Creations and deletions always count; updates only when the
    /// fingerprints differ.
    pub fn is_content_change(&self) -> bool {
        match self.kind {
            FileEventKind::Creation | FileEventKind::Deletion => true,
            FileEventKind::Update => self.before != self.after,
        }
    }
}
