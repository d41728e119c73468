//! Resolving note links to files and embedding linked note contents.
//!
//! Used both for following a link and for expanding overview notes: a note
//! whose body is a list of links can be turned into a single document with
//! every linked note embedded between marker lines, and such a document can
//! later be refreshed against the current contents of the linked notes.

use crate::corpus;
use crate::domain::{NoteId, find_links};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker prefix of an embedded-note header line.
const EMBED_HEADER: &str = "<!-- !";

/// Marker prefix of an embedded-note footer line.
const EMBED_FOOTER: &str = "<!-- (End of note";

/// Locates the file for `id`: first corpus match wins.
pub fn resolve(id: &NoteId, root: &Path, extension: &str) -> Option<PathBuf> {
    corpus::note_file_by_id(id, root, extension)
}

/// Reads the full text of the note with `id`, returning its path and
/// content; `None` when no file resolves or it cannot be read.
pub fn read_note(id: &NoteId, root: &Path, extension: &str) -> Option<(PathBuf, String)> {
    let path = resolve(id, root, extension)?;
    let text = fs::read_to_string(&path).ok()?;
    Some((path, text))
}

/// Returns the contents of the note with `id` wrapped between a generated
/// header (echoing the link delimiters and the note title) and a footer
/// marker. When resolution fails the result is a single "note not found"
/// marker line, with no footer.
pub fn embed(id: &NoteId, root: &Path, extension: &str, pre: &str, post: &str) -> Vec<String> {
    let mut lines = Vec::new();
    match read_note(id, root, extension) {
        None => lines.push(format!("<!-- Note not found: {id} -->")),
        Some((path, content)) => {
            let title = corpus::note_entry(&path, extension)
                .map(|(_, title)| title)
                .unwrap_or_default();
            let label = format!("{pre}{id}{post} {title}");
            lines.push(format!("{EMBED_HEADER}    {}    -->", label.trim_end()));
            lines.extend(content.split('\n').map(str::to_string));
            lines.push(format!("{EMBED_FOOTER} {id}) -->"));
        }
    }
    lines
}

/// Expands every note link in `text`, inserting the embedded contents of
/// each linked note after (or, with `replace_lines`, instead of) the line
/// carrying the link.
pub fn expand_links(text: &str, root: &Path, extension: &str, replace_lines: bool) -> String {
    let mut out = Vec::new();
    for line in text.split('\n') {
        let links = find_links(line);
        if links.is_empty() {
            out.push(line.to_string());
            continue;
        }
        if !replace_lines {
            out.push(line.to_string());
        }
        for link in links {
            out.extend(embed(
                &link.id,
                root,
                extension,
                &link.prefix,
                &link.postfix,
            ));
        }
    }
    out.join("\n")
}

/// Refreshes a previously expanded document: every block between an embed
/// header and its footer is replaced with the current contents of the
/// referenced note. Lines outside embed blocks pass through unchanged.
pub fn refresh(text: &str, root: &Path, extension: &str) -> String {
    let mut out = Vec::new();
    let mut pending: Option<(NoteId, String, String)> = None;

    for line in text.split('\n') {
        if let Some((id, pre, post)) = pending.take() {
            if !line.starts_with(EMBED_FOOTER) {
                pending = Some((id, pre, post));
                continue;
            }
            out.extend(embed(&id, root, extension, &pre, &post));
            continue;
        }

        if line.starts_with(EMBED_HEADER) {
            if let Some(link) = find_links(line).into_iter().next() {
                pending = Some((link.id, link.prefix, link.postfix));
                continue;
            }
        }
        out.push(line.to_string());
    }
    out.join("\n")
}
