//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::index::BackendChoice;
use output::{OutputFormat, SortOrder};

/// zettel - tag indexing and search over a folder of plain-text notes
#[derive(Parser, Debug)]
#[command(name = "zk", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Index backend (overrides config file)
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendChoice>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search notes with a tag query
    ///
    /// Grammar: comma-separated terms refine each other; within a term,
    /// space-separated specs must all hold. A spec is [!]tag[*] where `!`
    /// negates and `*` matches by prefix. `[!` lists all notes, `#!` all
    /// tags.
    Search(SearchArgs),

    /// List all tags in the corpus
    Tags(TagsArgs),

    /// List all notes in the corpus
    Notes(NotesArgs),

    /// Print the note id to tags index
    Index(IndexArgs),

    /// Resolve a note id or link to its file path
    Resolve(ResolveArgs),

    /// List notes referencing a note
    Backlinks(BacklinksArgs),

    /// Expand note links in an overview file to stdout
    Expand(ExpandArgs),

    /// Refresh a previously expanded overview file in place
    Refresh(RefreshArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search spec, e.g. '#project:* !#done'
    pub spec: String,

    /// Sort results by id or title (overrides config)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Show note counts for each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `notes` command
#[derive(Parser, Debug)]
pub struct NotesArgs {
    /// Sort notes by id or title (overrides config)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `index` command
#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `resolve` command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Note id, or any text containing one (e.g. '[[201901010000]]')
    pub id: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Paths)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Note id, or any text containing one
    pub id: String,

    /// Sort results by id or title (overrides config)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortOrder>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `expand` command
#[derive(Parser, Debug)]
pub struct ExpandArgs {
    /// Overview note file to expand
    pub file: PathBuf,

    /// Keep the link lines above the embedded content
    #[arg(long)]
    pub keep_links: bool,
}

/// Arguments for the `refresh` command
#[derive(Parser, Debug)]
pub struct RefreshArgs {
    /// Previously expanded file to refresh in place
    pub file: PathBuf,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
