//! Common test utilities and helpers

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Builds a source tree inside a temporary directory
pub struct TreeBuilder {
    temp_dir: TempDir,
    files: Vec<(PathBuf, Vec<u8>)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            files: Vec::new(),
        }
    }

    /// Add a file under `source/`
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        self.files
            .push((path.as_ref().to_path_buf(), content.as_ref().to_vec()));
        self
    }

    pub fn build(self) -> TestTree {
        let source = self.temp_dir.path().join("source");
        fs::create_dir_all(&source).expect("Failed to create source dir");
        for (path, content) in &self.files {
            let full = source.join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(&full, content).expect("Failed to write file");
        }

        TestTree {
            output: self.temp_dir.path().join("sorted"),
            source,
            temp_dir: self.temp_dir,
        }
    }
}

pub struct TestTree {
    pub temp_dir: TempDir,
    pub source: PathBuf,
    pub output: PathBuf,
}

impl TestTree {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Every file under `root`, keyed by its path relative to `root`
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let content = fs::read(entry.path()).unwrap();
            (relative, content)
        })
        .collect()
}
