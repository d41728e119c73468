//! Disposable note corpus for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory populated with note files.
pub struct CorpusDir {
    dir: TempDir,
}

impl CorpusDir {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp corpus"),
        }
    }

    /// Returns the corpus root path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a note file into the corpus root and returns its path.
    pub fn note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write note");
        path
    }

    /// Writes a note file into a subdirectory of the corpus.
    pub fn nested_note(&self, subdir: &str, name: &str, content: &str) -> PathBuf {
        let dir = self.dir.path().join(subdir);
        fs::create_dir_all(&dir).expect("Failed to create subdirectory");
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write note");
        path
    }
}

impl Default for CorpusDir {
    fn default() -> Self {
        Self::new()
    }
}
