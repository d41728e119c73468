//! Command handlers for the CLI.

mod backlinks;
mod expand;
mod index;
mod notes;
mod resolve;
mod search;
mod tags;

pub use backlinks::handle_backlinks;
pub use expand::{handle_expand, handle_refresh};
pub use index::handle_index;
pub use notes::handle_notes;
pub use resolve::handle_resolve;
pub use search::handle_search;
pub use tags::handle_tags;

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::cli::config::Config;
use crate::cli::output::{NoteListing, Output, OutputFormat, SortOrder};
use crate::corpus;
use crate::domain::{LinkStyle, NoteId};
use crate::index::{BackendChoice, ExternalTool, IndexBuilder, ResultsFile};

/// Per-invocation settings resolved from CLI flags and the config file,
/// shared by every handler.
pub struct Workspace {
    pub root: PathBuf,
    pub extension: String,
    pub tag_prefix: char,
    pub link_style: LinkStyle,
    pub backend: BackendChoice,
    pub tool: ExternalTool,
    pub results_file: Option<String>,
    pub sort_notes_by: SortOrder,
    pub verbose: bool,
}

impl Workspace {
    /// Resolves settings, CLI flags taking precedence over the config file.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            root: config.notes_dir(cli.dir.as_ref()),
            extension: config.extension(),
            tag_prefix: config.tag_prefix(),
            link_style: config.link_style(),
            backend: config.backend(cli.backend),
            tool: config.search_tool(),
            results_file: config.results_file.clone(),
            sort_notes_by: config.sort_notes_by(),
            verbose: cli.verbose > 0,
        }
    }

    /// An index builder for this workspace's corpus and backend choice.
    pub(crate) fn index_builder(&self) -> IndexBuilder {
        IndexBuilder::new(&self.root, &self.extension, self.tag_prefix)
            .backend(self.backend)
            .tool(self.tool.clone())
            .verbose(self.verbose)
    }

    /// The sidecar results file, when one is configured.
    pub(crate) fn results_file(&self) -> Option<ResultsFile> {
        self.results_file
            .as_ref()
            .map(|name| ResultsFile::new(&self.root, name))
    }
}

/// A note in a result set: id, title, and resolved path.
#[derive(Debug)]
pub(crate) struct ResolvedNote {
    pub(crate) id: NoteId,
    pub(crate) title: String,
    pub(crate) path: PathBuf,
}

/// Every note in the corpus, in scan order.
pub(crate) fn collect_notes(ws: &Workspace) -> Vec<ResolvedNote> {
    corpus::list_notes(&ws.root, &ws.extension)
        .into_iter()
        .filter_map(|path| {
            let (id, title) = corpus::note_entry(&path, &ws.extension)?;
            Some(ResolvedNote { id, title, path })
        })
        .collect()
}

/// Sorts a result set by the requested order, falling back to the
/// configured one.
pub(crate) fn sort_notes(notes: &mut [ResolvedNote], ws: &Workspace, requested: Option<SortOrder>) {
    match requested.unwrap_or(ws.sort_notes_by) {
        SortOrder::Id => notes.sort_by(|a, b| a.id.cmp(&b.id)),
        SortOrder::Title => notes.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

/// Prints a note result set and mirrors it into the sidecar listing when
/// one is configured.
pub(crate) fn emit_notes(
    notes: &[ResolvedNote],
    format: OutputFormat,
    ws: &Workspace,
    heading: &str,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No matching notes found.");
            } else {
                for note in notes {
                    let line = format!("{} {}", ws.link_style.wrap(&note.id), note.title);
                    println!("{}", line.trim_end());
                }
                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes
                .iter()
                .map(|note| NoteListing {
                    id: note.id.to_string(),
                    title: note.title.clone(),
                    path: note.path.to_string_lossy().to_string(),
                })
                .collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            for note in notes {
                println!("{}", note.path.display());
            }
        }
    }

    if let Some(sidecar) = ws.results_file() {
        let entries: Vec<(NoteId, String)> = notes
            .iter()
            .map(|note| (note.id.clone(), note.title.clone()))
            .collect();
        sidecar.write_notes(heading, &entries, ws.link_style)?;
    }
    Ok(())
}
