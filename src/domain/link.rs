//! Note-link detection and formatting.
//!
//! A link is an occurrence of a note id in text, introduced by a bracket run
//! (`[id]`, `[[id]]`) or the `§` sigil. The closing bracket is optional so
//! that `[[201711122259 This is a note]]` still resolves when expanding
//! overview notes. Links are parsed on demand, never stored.

use crate::domain::NoteId;
use regex::Regex;
use std::sync::OnceLock;

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"(\[+|§)({})(\]+|.?)", crate::domain::note_id::ID_PATTERN);
        Regex::new(&pattern).expect("link pattern is valid")
    })
}

/// A single note-link occurrence.
#[derive(Debug, Clone)]
pub struct Link {
    /// The linked note id.
    pub id: NoteId,
    /// The opening delimiter as written (`[`, `[[`, `§`).
    pub prefix: String,
    /// The closing delimiter as written; may be empty or a stray character.
    pub postfix: String,
    /// Byte span of the whole occurrence.
    pub span: (usize, usize),
}

/// Returns every note link in `text`, in order of appearance.
pub fn find_links(text: &str) -> Vec<Link> {
    link_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let id: NoteId = caps.get(2)?.as_str().parse().ok()?;
            Some(Link {
                id,
                prefix: caps.get(1)?.as_str().to_string(),
                postfix: caps.get(3).map_or(String::new(), |m| m.as_str().to_string()),
                span: (whole.start(), whole.end()),
            })
        })
        .collect()
}

/// Returns true if `text` contains a link to `id`.
pub fn references(text: &str, id: &NoteId) -> bool {
    find_links(text).iter().any(|link| link.id == *id)
}

/// Bracket style used when generating links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `[[id]]`
    Double,
    /// `[id]`
    Single,
}

impl LinkStyle {
    /// The opening delimiter.
    pub fn prefix(&self) -> &'static str {
        match self {
            LinkStyle::Double => "[[",
            LinkStyle::Single => "[",
        }
    }

    /// The closing delimiter.
    pub fn postfix(&self) -> &'static str {
        match self {
            LinkStyle::Double => "]]",
            LinkStyle::Single => "]",
        }
    }

    /// Formats a link to `id` in this style.
    pub fn wrap(&self, id: &NoteId) -> String {
        format!("{}{}{}", self.prefix(), id, self.postfix())
    }
}

impl Default for LinkStyle {
    fn default() -> Self {
        LinkStyle::Double
    }
}
