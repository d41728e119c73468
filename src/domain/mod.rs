//! Core domain types: note identifiers, tags, links, and the tokenizer
//! that extracts them from text.

pub mod link;
pub mod note_id;
pub mod tag;
pub mod tokenizer;

pub use link::{Link, LinkStyle, find_links, references};
pub use note_id::{NoteId, ParseNoteIdError};
pub use tag::{DEFAULT_TAG_PREFIX, ParseTagError, Tag};
pub use tokenizer::Tokenizer;
