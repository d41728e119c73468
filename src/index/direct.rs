//! In-process index backend: read every note and tokenize its text.

use super::FileTags;
use crate::corpus;
use crate::domain::{Tag, Tokenizer};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Scans the corpus by reading every matching file and extracting its tags.
///
/// Unreadable files (permissions, non-UTF-8 content) are skipped; they are
/// reported on stderr in verbose mode. Files with no tags contribute no
/// record, matching the accelerated backend, which only reports files with
/// matches.
pub(crate) fn scan(
    root: &Path,
    extension: &str,
    tokenizer: &Tokenizer,
    verbose: bool,
) -> Vec<FileTags> {
    let mut records = Vec::new();
    for path in corpus::list_notes(root, extension) {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                if verbose {
                    eprintln!("zettel: skipping {}: {}", path.display(), err);
                }
                continue;
            }
        };
        let tags: BTreeSet<Tag> = tokenizer.find_tags(&text).into_iter().collect();
        if tags.is_empty() {
            continue;
        }
        records.push(FileTags {
            id: corpus::note_id_of_file(&path, extension),
            tags,
        });
    }
    records
}
