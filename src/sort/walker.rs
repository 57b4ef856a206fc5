//! Recursive file discovery
//!
//! `FileWalker` yields every regular file below a root directory. Traversal
//! is iterative (walkdir keeps an explicit stack of open directories), so
//! deep trees never grow the call stack.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use walkdir::{DirEntry, WalkDir};

type EntryFilter = Box<dyn FnMut(&DirEntry) -> bool + Send>;

/// Lazy iterator over the regular files under a root directory
///
/// Unreadable subtrees are logged and skipped; the walk carries on with
/// their siblings. Symbolic links are not followed.
pub struct FileWalker {
    root: PathBuf,
    inner: walkdir::FilterEntry<walkdir::IntoIter, EntryFilter>,
    errors: usize,
}

impl FileWalker {
    /// Start a walk at `root`, which must be an existing directory
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_excluded(root, None)
    }

    /// Start a walk that prunes the directory `excluded` (and everything below it)
    pub fn with_excluded(root: impl AsRef<Path>, excluded: Option<&Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::InvalidSource { path: root });
        }

        // Compared canonically so `out`, `./out` and absolute spellings all match
        let excluded = excluded.and_then(|path| path.canonicalize().ok());
        let filter: EntryFilter = Box::new(move |entry: &DirEntry| match &excluded {
            Some(excluded) if entry.file_type().is_dir() && entry.depth() > 0 => {
                let keep = entry
                    .path()
                    .canonicalize()
                    .map(|path| path != *excluded)
                    .unwrap_or(true);
                if !keep {
                    debug!("Pruning output folder from walk: {}", entry.path().display());
                }
                keep
            }
            _ => true,
        });

        let inner = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(filter);

        Ok(Self {
            root,
            inner,
            errors: 0,
        })
    }

    /// Number of traversal errors skipped so far
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for FileWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    if file_type.is_file() {
                        info!("Reading file: {}", entry.path().display());
                        return Some(entry.into_path());
                    } else if file_type.is_dir() {
                        info!("Reading dir: {}", entry.path().display());
                    } else {
                        debug!("Skipping non-regular entry: {}", entry.path().display());
                    }
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    let err = Error::Traversal { path, source: err };
                    error!("Error processing folder: {}", err);
                    self.errors += 1;
                }
            }
        }
    }
}
