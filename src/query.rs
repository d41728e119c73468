//! Advanced tag-search query engine.
//!
//! Grammar:
//!
//! ```text
//! search-spec := search-term (',' search-term)*
//! search-term := tag-spec (whitespace tag-spec)*
//! tag-spec    := ['!'] tag-name ['*']        -- '!' negates, '*' matches by prefix
//! ```
//!
//! Comma-separated terms evaluate as sequential refinement passes: each term
//! filters the set of notes that survived the previous one. Within a term,
//! tag-specs are conjoined. Two escape forms bypass the engine entirely and
//! are recognized on the raw input before any parsing: a spec starting with
//! `[!` lists all notes, one starting with `#!` lists all tags.
//!
//! Evaluation never fails: empty terms are skipped, and a tag-spec with no
//! name after its sigils matches nothing without aborting the rest of the
//! query.

use crate::domain::{NoteId, Tag};
use crate::index::TagIndex;
use std::collections::BTreeSet;

/// Escape form: list all notes instead of searching.
pub const ALL_NOTES_ESCAPE: &str = "[!";

/// Escape form: list all tags instead of searching.
pub const ALL_TAGS_ESCAPE: &str = "#!";

/// A parsed search input: either an escape form or a search spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `[!` — every note in the corpus, no filtering.
    AllNotes,
    /// `#!` — every tag in the corpus, no filtering.
    AllTags,
    /// A tag-search expression.
    Spec(SearchSpec),
}

impl Query {
    /// Parses raw search input, checking the escape forms first.
    pub fn parse(input: &str) -> Self {
        if input.starts_with(ALL_NOTES_ESCAPE) {
            Query::AllNotes
        } else if input.starts_with(ALL_TAGS_ESCAPE) {
            Query::AllTags
        } else {
            Query::Spec(SearchSpec::parse(input))
        }
    }
}

/// A parsed search spec: comma-separated refinement terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    terms: Vec<SearchTerm>,
}

/// One whitespace-separated conjunction of tag-specs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchTerm {
    specs: Vec<TagSpec>,
}

/// A single tag condition.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TagSpec {
    negate: bool,
    by_prefix: bool,
    /// Tag name as written, including its prefix characters (`#done`).
    /// Empty when the spec was only sigils; such a spec matches nothing.
    name: String,
}

impl TagSpec {
    fn parse(token: &str) -> Self {
        let negate = token.starts_with('!');
        let token = token.strip_prefix('!').unwrap_or(token);
        let by_prefix = token.ends_with('*');
        let name = token.strip_suffix('*').unwrap_or(token).to_string();
        Self {
            negate,
            by_prefix,
            name,
        }
    }

    fn matches(&self, tags: &BTreeSet<Tag>) -> bool {
        if self.name.is_empty() {
            return false;
        }
        let hit = if self.by_prefix {
            tags.iter().any(|tag| tag.as_str().starts_with(&self.name))
        } else {
            tags.iter().any(|tag| tag.as_str() == self.name)
        };
        hit != self.negate
    }
}

impl SearchSpec {
    /// Parses a search spec. Parsing is total: malformed pieces degrade to
    /// specs that match nothing rather than errors.
    pub fn parse(input: &str) -> Self {
        let terms = input
            .split(',')
            .map(|term| SearchTerm {
                specs: term.split_whitespace().map(TagSpec::parse).collect(),
            })
            .collect();
        Self { terms }
    }

    /// Evaluates the spec against an index, returning the surviving note
    /// ids in lexicographic order.
    ///
    /// Each term replaces the working set with the subset of notes whose
    /// tags satisfy all of its specs. Terms with no specs are skipped;
    /// blank input with no specs at all matches nothing.
    pub fn evaluate(&self, index: &TagIndex) -> Vec<NoteId> {
        if self.terms.iter().all(|term| term.specs.is_empty()) {
            return Vec::new();
        }
        let mut working: Vec<(&NoteId, &BTreeSet<Tag>)> = index.iter().collect();
        for term in &self.terms {
            if term.specs.is_empty() {
                continue;
            }
            working.retain(|&(_, tags)| term.specs.iter().all(|spec| spec.matches(tags)));
        }
        working.into_iter().map(|(id, _)| id.clone()).collect()
    }
}
