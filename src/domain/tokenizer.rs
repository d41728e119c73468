//! Tag extraction from note text.
//!
//! One grammar definition shared by every consumer: the in-process scanner,
//! the cursor-position lookup, and the pattern handed to an external line
//! search tool. A tag is a run of prefix characters followed by at least one
//! body character; body characters exclude whitespace, the stop set and the
//! prefix itself, and `:` continues a tag only while followed by an
//! alphanumeric (hierarchical tags like `#project:status`).

use crate::domain::tag::{Tag, TAG_STOPS, is_tag_stop};
use regex::Regex;

/// Tokenizer for a fixed tag prefix character.
///
/// The grammar regex is compiled once at construction.
pub struct Tokenizer {
    prefix: char,
    tags: Regex,
}

impl Tokenizer {
    /// Creates a tokenizer for the given tag prefix character.
    pub fn new(prefix: char) -> Self {
        let tags = Regex::new(&Self::body_pattern(prefix)).expect("tag pattern is valid");
        Self { prefix, tags }
    }

    /// Returns the tag prefix character.
    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// The raw tag-run pattern, without any context conditions.
    fn body_pattern(prefix: char) -> String {
        let p = regex::escape(&prefix.to_string());
        let stops = regex::escape(TAG_STOPS);
        format!("{p}+(?:[^{p}{stops}\\s:]|:[0-9A-Za-z])+")
    }

    /// The tag pattern for external line-search tools.
    ///
    /// External tools use PCRE-style engines, so the token-start condition
    /// (preceded by whitespace or line start, not inside an inline code
    /// span) is expressed with lookbehinds instead of being checked in
    /// process.
    pub fn line_search_pattern(&self) -> String {
        format!("(?<=\\s|^)(?<!`)({})", Self::body_pattern(self.prefix))
    }

    /// Returns every tag in `text`, in order of appearance, duplicates
    /// included. Callers wanting a tag set deduplicate via `BTreeSet`.
    pub fn find_tags(&self, text: &str) -> Vec<Tag> {
        let mut tags = Vec::new();
        for m in self.tags.find_iter(text) {
            if !self.starts_token(text, m.start()) {
                continue;
            }
            if let Ok(tag) = Tag::new(m.as_str(), self.prefix) {
                tags.push(tag);
            }
        }
        tags
    }

    /// A tag run only counts when it begins a token: at the start of the
    /// text or after whitespace. A preceding backtick means the run sits in
    /// an inline code span and is never a tag.
    fn starts_token(&self, text: &str, start: usize) -> bool {
        match text[..start].chars().next_back() {
            None => true,
            Some('`') => false,
            Some(c) => c.is_whitespace(),
        }
    }

    /// Finds the tag containing or immediately preceding byte position
    /// `pos`, returning the tag and its byte span.
    ///
    /// Scans backward from `pos` to the start of the nearest prefix run,
    /// merging consecutive prefix characters (`##tag` resolves to one tag),
    /// then forward applying the colon-continuation rule. Returns `None`
    /// when the run has no body (a bare heading marker).
    pub fn find_tag_at(&self, text: &str, pos: usize) -> Option<(Tag, (usize, usize))> {
        if text.is_empty() {
            return None;
        }
        let mut pos = pos.min(text.len() - 1);
        while pos > 0 && !text.is_char_boundary(pos) {
            pos -= 1;
        }
        // The character under the cursor takes part in the backward search.
        let cursor_end = pos + text[pos..].chars().next().map_or(0, char::len_utf8);

        let mut start = text[..cursor_end].rfind(self.prefix)?;
        while let Some(prev) = text[..start].chars().next_back() {
            if prev != self.prefix {
                break;
            }
            start -= prev.len_utf8();
        }

        let rest = &text[start..];
        let body_start = rest
            .find(|c: char| c != self.prefix)
            .unwrap_or(rest.len());
        let mut end = start + body_start;

        let mut chars = rest[body_start..].chars().peekable();
        while let Some(c) = chars.next() {
            if c == ':' {
                match chars.peek() {
                    Some(n) if n.is_ascii_alphanumeric() => {
                        end += 1;
                        continue;
                    }
                    _ => break,
                }
            }
            if c.is_whitespace() || is_tag_stop(c) || c == self.prefix {
                break;
            }
            end += c.len_utf8();
        }

        let tag = Tag::new(&text[start..end], self.prefix).ok()?;
        Some((tag, (start, end)))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(crate::domain::tag::DEFAULT_TAG_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags_of(text: &str) -> Vec<String> {
        Tokenizer::default()
            .find_tags(text)
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }

    // ===========================================
    // find_tags
    // ===========================================

    #[test]
    fn finds_simple_tags() {
        assert_eq!(tags_of("a #one and #two"), vec!["#one", "#two"]);
    }

    #[test]
    fn finds_tag_at_text_start() {
        assert_eq!(tags_of("#first word"), vec!["#first"]);
    }

    #[test]
    fn trailing_punctuation_is_cut_off() {
        assert_eq!(tags_of("see #real_tag, later"), vec!["#real_tag"]);
        assert_eq!(tags_of("(#inside)"), Vec::<String>::new());
        assert_eq!(tags_of(" #tag."), vec!["#tag"]);
    }

    #[test]
    fn backtick_fenced_run_is_not_a_tag() {
        assert_eq!(tags_of("`#not_a_tag`"), Vec::<String>::new());
    }

    #[test]
    fn heading_marker_is_not_a_tag() {
        assert_eq!(tags_of("# Heading"), Vec::<String>::new());
        assert_eq!(tags_of("## Subheading"), Vec::<String>::new());
    }

    #[test]
    fn run_must_begin_a_token() {
        assert_eq!(tags_of("word#glued"), Vec::<String>::new());
    }

    #[test]
    fn colon_continues_into_hierarchy() {
        assert_eq!(tags_of("state: #project:status done"), vec!["#project:status"]);
    }

    #[test]
    fn colon_without_alphanumeric_ends_tag() {
        assert_eq!(tags_of("see #topic: rest"), vec!["#topic"]);
        assert_eq!(tags_of("see #topic:, rest"), vec!["#topic"]);
    }

    #[test]
    fn doubled_prefix_is_one_tag() {
        assert_eq!(tags_of("a ##literature note"), vec!["##literature"]);
    }

    #[test]
    fn duplicates_are_reported_per_occurrence() {
        assert_eq!(tags_of("#x then #x"), vec!["#x", "#x"]);
    }

    #[test]
    fn never_returns_prefix_only_runs() {
        for text in ["#", "# #", "### ###", "a # b ## c", "#\n##\n"] {
            for tag in Tokenizer::default().find_tags(text) {
                assert!(
                    tag.as_str().chars().any(|c| c != '#'),
                    "prefix-only token {:?} from {:?}",
                    tag,
                    text
                );
            }
        }
    }

    #[test]
    fn custom_prefix_character() {
        let tok = Tokenizer::new('@');
        let tags: Vec<_> = tok
            .find_tags("note @home and #ignored")
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect();
        assert_eq!(tags, vec!["@home"]);
    }

    // ===========================================
    // find_tag_at
    // ===========================================

    fn at(text: &str, pos: usize) -> Option<(String, (usize, usize))> {
        Tokenizer::default()
            .find_tag_at(text, pos)
            .map(|(t, span)| (t.as_str().to_string(), span))
    }

    #[test]
    fn cursor_inside_tag() {
        assert_eq!(at("see #tag here", 6), Some(("#tag".into(), (4, 8))));
    }

    #[test]
    fn cursor_on_prefix_char() {
        assert_eq!(at("see #tag here", 4), Some(("#tag".into(), (4, 8))));
    }

    #[test]
    fn doubled_prefix_merges_into_one_tag() {
        assert_eq!(
            at("see ##deep:tag1 here", 6),
            Some(("##deep:tag1".into(), (4, 15)))
        );
    }

    #[test]
    fn trailing_unmatched_colon_is_trimmed() {
        assert_eq!(at("see #topic: here", 7), Some(("#topic".into(), (4, 10))));
    }

    #[test]
    fn heading_marker_yields_none() {
        assert_eq!(at("# Heading", 0), None);
    }

    #[test]
    fn no_prefix_before_cursor_yields_none() {
        assert_eq!(at("plain text #tag", 3), None);
    }

    #[test]
    fn cursor_past_end_is_clamped() {
        assert_eq!(at("see #tag", 100), Some(("#tag".into(), (4, 8))));
    }

    #[test]
    fn stop_character_ends_tag_body() {
        assert_eq!(at("x #a.b", 3), Some(("#a".into(), (2, 4))));
    }

    // ===========================================
    // external pattern
    // ===========================================

    #[test]
    fn line_search_pattern_embeds_lookbehinds() {
        let pattern = Tokenizer::default().line_search_pattern();
        assert!(pattern.starts_with("(?<=\\s|^)(?<!`)"));
        assert!(pattern.contains("#+"));
    }
}
