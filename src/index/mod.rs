//! Note-corpus tag index construction.
//!
//! The index maps every note id to the set of tags found anywhere in that
//! note's text. It is rebuilt fresh for each search — there is no persisted
//! cache and no invalidation protocol; staleness is bounded by "constructed
//! immediately before use".
//!
//! Two interchangeable backends produce the same mapping: [`direct`] reads
//! and tokenizes every file in process, [`accelerated`] delegates to an
//! external line-search tool for large corpora. Backend selection is an
//! explicit configuration value threaded into the builder.

mod accelerated;
mod direct;
mod listing;

pub use accelerated::{
    DEFAULT_SEARCH_TIMEOUT, DEFAULT_SEARCH_TOOL, ExternalTool, SearchToolError,
};
pub use listing::{DEFAULT_RESULTS_FILE, ResultsFile};

use crate::domain::{NoteId, Tag, Tokenizer};
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Mapping from note id to that note's tag set.
///
/// Only notes containing at least one tag appear; a `BTreeMap` keeps ids in
/// lexicographic (chronological) order.
pub type TagIndex = BTreeMap<NoteId, BTreeSet<Tag>>;

/// Tags found in one file — the record shape both backends produce.
#[derive(Debug, Clone)]
pub(crate) struct FileTags {
    /// Id derived from the filename; `None` for files that match the
    /// extension but are not id-named notes.
    pub(crate) id: Option<NoteId>,
    pub(crate) tags: BTreeSet<Tag>,
}

/// Which index backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Probe for the external search tool; fall back to in-process scanning.
    #[default]
    Auto,
    /// Always read and tokenize files in process.
    Direct,
    /// Prefer the external search tool. The capability probe still gates the
    /// choice, so this behaves like `auto` when the tool is missing.
    Accelerated,
}

/// Builds the id → tag set mapping for a corpus.
pub struct IndexBuilder {
    root: PathBuf,
    extension: String,
    tokenizer: Tokenizer,
    backend: BackendChoice,
    tool: ExternalTool,
    verbose: bool,
}

impl IndexBuilder {
    /// Creates a builder for the corpus under `root`.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>, tag_prefix: char) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            tokenizer: Tokenizer::new(tag_prefix),
            backend: BackendChoice::default(),
            tool: ExternalTool::default(),
            verbose: false,
        }
    }

    /// Selects the backend.
    pub fn backend(mut self, backend: BackendChoice) -> Self {
        self.backend = backend;
        self
    }

    /// Configures the external search tool used by the accelerated backend.
    pub fn tool(mut self, tool: ExternalTool) -> Self {
        self.tool = tool;
        self
    }

    /// Enables progress/diagnostic output on stderr.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builds the index.
    ///
    /// Files without a resolvable note id are skipped. In the anomalous case
    /// of several files sharing one id, their tag sets are merged.
    pub fn build(&self) -> TagIndex {
        let mut index = TagIndex::new();
        for record in self.scan() {
            let Some(id) = record.id else { continue };
            index.entry(id).or_default().extend(record.tags);
        }
        index
    }

    /// Collects every tag in the corpus with the number of files it occurs
    /// in. Unlike [`IndexBuilder::build`], this includes files that match
    /// the extension but carry no note id.
    pub fn all_tags(&self) -> BTreeMap<Tag, usize> {
        let mut tags = BTreeMap::new();
        for record in self.scan() {
            for tag in record.tags {
                *tags.entry(tag).or_insert(0) += 1;
            }
        }
        tags
    }

    fn scan(&self) -> Vec<FileTags> {
        match self.backend {
            BackendChoice::Direct => self.scan_direct(),
            BackendChoice::Auto | BackendChoice::Accelerated => {
                if !self.tool.probe() {
                    return self.scan_direct();
                }
                let pattern = self.tokenizer.line_search_pattern();
                match self.tool.scan(
                    &self.root,
                    &self.extension,
                    &pattern,
                    self.tokenizer.prefix(),
                ) {
                    Ok(records) => records,
                    Err(err) => {
                        eprintln!("zettel: external search failed: {err}");
                        Vec::new()
                    }
                }
            }
        }
    }

    fn scan_direct(&self) -> Vec<FileTags> {
        direct::scan(&self.root, &self.extension, &self.tokenizer, self.verbose)
    }
}
