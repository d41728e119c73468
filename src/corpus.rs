//! Note corpus scanning: enumerating note files under a root directory and
//! resolving note ids to paths.
//!
//! Scan order is lexicographic by full path, so "first match wins" lookups
//! are reproducible across platforms and filesystems.

use crate::domain::NoteId;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Default note file extension, including the dot.
pub const DEFAULT_EXTENSION: &str = ".md";

/// Returns every note file under `root` with the given extension,
/// recursively, sorted by full path.
///
/// Hidden files and directories (starting with `.`) are skipped, which also
/// keeps sidecar result listings out of the corpus. A missing or unreadable
/// root yields an empty list, never an error.
pub fn list_notes(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut notes: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_extension(e.path(), extension))
        .map(|e| e.path().to_path_buf())
        .collect();
    notes.sort();
    notes
}

/// Returns the note id of a file, or `None` if the file is not a note.
///
/// Valid only when the path ends with `extension` and the basename starts
/// with the extracted id. The second condition guards against files that
/// merely contain a digit run somewhere else in their name.
pub fn note_id_of_file(path: &Path, extension: &str) -> Option<NoteId> {
    if !has_extension(path, extension) {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    let id = NoteId::find_in(name)?;
    name.starts_with(id.as_str()).then_some(id)
}

/// Returns the first file under `root` (scan order) whose basename starts
/// with `id` and which ends with `extension`; `None` if there is no match.
pub fn note_file_by_id(id: &NoteId, root: &Path, extension: &str) -> Option<PathBuf> {
    list_notes(root, extension).into_iter().find(|path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(id.as_str()))
    })
}

/// Returns the `(id, title)` pair for a note file.
///
/// The title is everything after the first space in the basename, with the
/// extension removed; a note named only by its id has an empty title.
pub fn note_entry(path: &Path, extension: &str) -> Option<(NoteId, String)> {
    let id = note_id_of_file(path, extension)?;
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(extension).unwrap_or(name);
    let title = stem.split_once(' ').map_or("", |(_, title)| title);
    Some((id, title.to_string()))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(extension))
}
