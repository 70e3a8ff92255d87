//! notify-backed file event source
//!
//! Subscribes to the watch roots and turns raw notify events into
//! [`FileEvent`]s. The kind is decided by comparing the file against the
//! last fingerprint seen for it, not by the notify event kind, which varies
//! too much between platforms and editors.
//!
//! Reload files (the build definition) are always tracked, even when an
//! ignore pattern covers them or they sit outside the watch roots.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use ignore::WalkBuilder;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::entities::FileEvent;
use crate::domain::value_objects::Fingerprint;
use crate::error::TildeResult;
use crate::infrastructure::source::Signal;

use super::filter::IgnoreFilter;

/// Live subscription. Dropping it stops the watcher.
pub struct NotifyEventSource {
    _watcher: RecommendedWatcher,
    roots: Vec<PathBuf>,
}

impl NotifyEventSource {
    /// Fingerprint everything under `roots` and every reload file, then
    /// start forwarding changes.
    pub fn start(
        roots: &[PathBuf],
        reload_files: &[PathBuf],
        filter: IgnoreFilter,
        tx: Sender<Signal>,
    ) -> TildeResult<Self> {
        let mut tracker =
            FingerprintTracker::new(filter).with_always_watched(reload_files.iter().cloned());
        for root in roots {
            tracker.prime(root);
        }
        tracker.prime_always_watched();
        tracing::debug!(files = tracker.len(), "fingerprinted watch roots");

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    for change in tracker.classify(&event) {
                        if tx.send(Signal::File(change)).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => tracing::warn!("file watcher error: {}", e),
            },
            notify::Config::default(),
        )?;

        for root in roots {
            watcher.watch(root, RecursiveMode::Recursive)?;
        }
        for dir in extra_dirs(roots, reload_files) {
            watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        }

        Ok(Self {
            _watcher: watcher,
            roots: roots.to_vec(),
        })
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

/// Existing parent directories of reload files not already covered by a root.
fn extra_dirs(roots: &[PathBuf], reload_files: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for file in reload_files {
        let Some(parent) = file.parent() else {
            continue;
        };
        if parent.is_dir()
            && !roots.iter().any(|root| parent.starts_with(root))
            && !dirs.iter().any(|d| d == parent)
        {
            dirs.push(parent.to_path_buf());
        }
    }
    dirs
}

/// Last known content fingerprint per file.
///
/// A tracker that was never primed accepts paths anywhere; once primed it
/// only reports paths under its roots, plus the always-watched files.
#[derive(Debug)]
pub struct FingerprintTracker {
    filter: IgnoreFilter,
    roots: Vec<PathBuf>,
    always_watched: HashSet<PathBuf>,
    known: HashMap<PathBuf, Fingerprint>,
}

impl FingerprintTracker {
    pub fn new(filter: IgnoreFilter) -> Self {
        Self {
            filter,
            roots: Vec::new(),
            always_watched: HashSet::new(),
            known: HashMap::new(),
        }
    }

    /// Files tracked regardless of ignore patterns and roots
    pub fn with_always_watched(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.always_watched.extend(paths);
        self
    }

    fn is_tracked(&self, path: &Path) -> bool {
        if self.always_watched.contains(path) {
            return true;
        }
        let in_scope =
            self.roots.is_empty() || self.roots.iter().any(|root| path.starts_with(root));
        in_scope && !self.filter.is_ignored(path, false)
    }

    /// Record current fingerprints under `root` without emitting events.
    pub fn prime(&mut self, root: &Path) {
        self.roots.push(root.to_path_buf());

        let mut walker = WalkBuilder::new(root);
        walker.standard_filters(false);

        for entry in walker.build().filter_map(Result::ok) {
            let path = entry.path();
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if is_dir || !self.is_tracked(path) {
                continue;
            }
            if let Ok(Some(fingerprint)) = read_fingerprint(path) {
                self.known.insert(path.to_path_buf(), fingerprint);
            }
        }
    }

    /// Record current fingerprints of the always-watched files.
    pub fn prime_always_watched(&mut self) {
        let paths: Vec<PathBuf> = self.always_watched.iter().cloned().collect();
        for path in paths {
            if let Ok(Some(fingerprint)) = read_fingerprint(&path) {
                self.known.insert(path, fingerprint);
            }
        }
    }

    pub fn classify(&mut self, event: &Event) -> Vec<FileEvent> {
        if matches!(event.kind, EventKind::Access(_)) {
            return Vec::new();
        }
        event
            .paths
            .iter()
            .filter_map(|path| self.observe(path))
            .collect()
    }

    /// Compare `path` with what was last seen there.
    pub fn observe(&mut self, path: &Path) -> Option<FileEvent> {
        if path.is_dir() || !self.is_tracked(path) {
            return None;
        }

        match read_fingerprint(path) {
            Ok(Some(after)) => match self.known.insert(path.to_path_buf(), after.clone()) {
                Some(before) => Some(FileEvent::updated(path, before, after)),
                None => Some(FileEvent::created(path).with_after(after)),
            },
            Ok(None) => self
                .known
                .remove(path)
                .map(|before| FileEvent::deleted(path).with_before(before)),
            Err(e) => {
                tracing::debug!(path = %path.display(), "unreadable, skipping: {}", e);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

fn read_fingerprint(path: &Path) -> io::Result<Option<Fingerprint>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(Fingerprint::from_bytes(&bytes))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
