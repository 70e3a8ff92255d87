//! Ignore filter for watched paths
//!
//! Gitignore-style patterns from `[watch] ignore`, matched relative to the
//! project root.

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{TildeError, TildeResult};

/// Paths the watcher should never report.
#[derive(Debug)]
pub struct IgnoreFilter {
    root: PathBuf,
    matcher: Gitignore,
}

impl IgnoreFilter {
    /// Matches nothing.
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            matcher: Gitignore::empty(),
            root,
        }
    }

    pub fn new<S: AsRef<str>>(root: impl Into<PathBuf>, patterns: &[S]) -> TildeResult<Self> {
        let root = root.into();
        let mut builder = GitignoreBuilder::new(&root);

        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, pattern)
                .map_err(|e| TildeError::IgnorePattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
        }

        let matcher = builder.build().map_err(|e| TildeError::IgnorePattern {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            message: e.to_string(),
        })?;

        Ok(Self { root, matcher })
    }

    /// Is `path` (or any directory above it) ignored?
    ///
    /// Paths outside the root are never ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let relative = if path.is_absolute() {
            match path.strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => return false,
            }
        } else {
            path
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
