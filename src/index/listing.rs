//! Sidecar results file: a plain-text projection of listings and search
//! results, fully regenerated on every write.

use crate::domain::{LinkStyle, NoteId, Tag};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default sidecar file name, relative to the corpus root.
pub const DEFAULT_RESULTS_FILE: &str = ".search_results.zkr";

/// A sidecar listing file.
///
/// Writes are whole-file replacements through a temporary file and atomic
/// rename, so readers never observe a half-written listing. The file is a
/// display projection only; nothing reads it back.
pub struct ResultsFile {
    path: PathBuf,
}

impl ResultsFile {
    /// A results file named `name` in the corpus root.
    pub fn new(root: &Path, name: &str) -> Self {
        Self {
            path: root.join(name),
        }
    }

    /// Returns the sidecar path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the listing with a heading and one `* [[id]] title` line
    /// per entry, in the given order.
    pub fn write_notes(
        &self,
        heading: &str,
        entries: &[(NoteId, String)],
        style: LinkStyle,
    ) -> io::Result<()> {
        let mut content = format!("{heading}\n\n");
        for (id, title) in entries {
            let line = format!("* {} {}", style.wrap(id), title);
            content.push_str(line.trim_end());
            content.push('\n');
        }
        self.replace(&content)
    }

    /// Replaces the listing with a heading and one `* #tag` line per tag,
    /// sorted.
    pub fn write_tags<'a>(
        &self,
        heading: &str,
        tags: impl IntoIterator<Item = &'a Tag>,
    ) -> io::Result<()> {
        let mut lines: Vec<String> = tags.into_iter().map(|t| format!("* {t}")).collect();
        lines.sort();
        let mut content = format!("{heading}\n\n");
        for line in lines {
            content.push_str(&line);
            content.push('\n');
        }
        self.replace(&content)
    }

    fn replace(&self, content: &str) -> io::Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
