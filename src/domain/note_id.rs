//! Timestamp-derived note identifier with extraction from free text.

use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Pattern for a note id embedded in free text: 12 to 18 digits, with `.`
/// separators allowed for sub-minute disambiguation suffixes. Shared with
/// the link matcher.
pub(crate) const ID_PATTERN: &str = r"[0-9.]{12,18}";

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ID_PATTERN).expect("note id pattern is valid"))
}

/// A unique identifier for notes derived from a creation timestamp.
///
/// Ids are 12 to 18 characters of decimal digits, optionally containing `.`
/// separators (e.g. `201901010000` for minute precision, `20190101000000`
/// with seconds, `201901010000.1` with a disambiguation suffix).
///
/// The string form sorts lexicographically in chronological order, which is
/// what note listings rely on.
///
/// # Examples
///
/// ```
/// use zettel::domain::NoteId;
///
/// let id: NoteId = "201901010000".parse().unwrap();
/// assert_eq!(id.as_str(), "201901010000");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a NoteId from the current local time.
    ///
    /// Minute precision by default; `with_seconds` appends the seconds so
    /// several notes can be created within the same minute.
    pub fn now(with_seconds: bool) -> Self {
        let now = Local::now();
        let formatted = if with_seconds {
            now.format("%Y%m%d%H%M%S")
        } else {
            now.format("%Y%m%d%H%M")
        };
        Self(formatted.to_string())
    }

    /// Returns the first note id found anywhere in `text`, if any.
    ///
    /// Used to pull an id out of a filename or a link body, where the id may
    /// be followed by a title or closing brackets.
    pub fn find_in(text: &str) -> Option<Self> {
        id_regex()
            .find_iter(text)
            .find_map(|m| m.as_str().parse().ok())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid note id string.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError(String);

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid note id '{}': expected 12-18 digits or dots",
            self.0
        )
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = (12..=18).contains(&s.len())
            && s.chars().all(|c| c.is_ascii_digit() || c == '.')
            && s.chars().any(|c| c.is_ascii_digit());
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseNoteIdError(s.to_string()))
        }
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
