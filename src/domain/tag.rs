//! Prefixed tag token used for categorization and search.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The default tag prefix character.
pub const DEFAULT_TAG_PREFIX: char = '#';

/// Characters that terminate a tag token.
///
/// A tag run ends at whitespace or at any of these. `:` is handled
/// separately: it continues a tag only while followed by an alphanumeric.
pub const TAG_STOPS: &str = ".,/!$%^&*;{}[]'\"=`~()<>\\";

/// Returns true if `c` terminates a tag run.
pub fn is_tag_stop(c: char) -> bool {
    TAG_STOPS.contains(c)
}

/// A tag token, stored with its prefix characters (e.g. `#done`,
/// `##literature`, `#project:status`).
///
/// Tags are case-sensitive and compared by exact string equality; prefix
/// matching for wildcard queries is plain string prefix matching. Doubled
/// prefixes are preserved: `##tag` is a distinct tag from `#tag`.
///
/// # Examples
///
/// ```
/// use zettel::domain::Tag;
///
/// let tag: Tag = "#project:status".parse().unwrap();
/// assert_eq!(tag.as_str(), "#project:status");
/// assert_eq!(tag.name(), "project:status");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string, validated against the tag grammar
    /// for the given prefix character.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if:
    /// - The string does not start with the prefix character
    /// - Nothing but prefix characters remain (a bare heading marker)
    /// - The body contains whitespace or a stop character
    /// - A `:` is not followed by an alphanumeric character
    pub fn new(s: &str, prefix: char) -> Result<Self, ParseTagError> {
        if !s.starts_with(prefix) {
            return Err(ParseTagError(format!(
                "invalid tag '{}': must start with '{}'",
                s, prefix
            )));
        }
        let body = s.trim_start_matches(prefix);
        if body.is_empty() {
            return Err(ParseTagError(format!(
                "invalid tag '{}': no content after prefix",
                s
            )));
        }

        let mut chars = body.chars().peekable();
        while let Some(c) = chars.next() {
            if c == ':' {
                match chars.peek() {
                    Some(n) if n.is_ascii_alphanumeric() => continue,
                    _ => {
                        return Err(ParseTagError(format!(
                            "invalid tag '{}': ':' must be followed by an alphanumeric",
                            s
                        )));
                    }
                }
            }
            if c.is_whitespace() || is_tag_stop(c) || c == prefix {
                return Err(ParseTagError(format!(
                    "invalid tag '{}': contains '{}'",
                    s, c
                )));
            }
        }

        Ok(Self(s.to_string()))
    }

    /// Returns the full tag including prefix characters.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the tag body with prefix characters stripped.
    pub fn name(&self) -> &str {
        match self.0.chars().next() {
            Some(prefix) => self.0.trim_start_matches(prefix),
            None => "",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s, DEFAULT_TAG_PREFIX)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
