//! zettel - tag indexing and search over a folder of plain-text notes
//!
//! Notes are files named `<id> <title>.md` where the id is a numeric
//! timestamp. Tags are `#`-prefixed tokens anywhere in note text. The index
//! mapping ids to tag sets is rebuilt fresh for each command and queried
//! with a small boolean search grammar.

pub mod cli;
pub mod corpus;
pub mod domain;
pub mod index;
pub mod query;
pub mod resolve;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        Workspace, handle_backlinks, handle_expand, handle_index, handle_notes, handle_refresh,
        handle_resolve, handle_search, handle_tags,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let workspace = Workspace::resolve(&cli, &config);

    match &cli.command {
        Command::Search(args) => handle_search(args, &workspace),
        Command::Tags(args) => handle_tags(args, &workspace),
        Command::Notes(args) => handle_notes(args, &workspace),
        Command::Index(args) => handle_index(args, &workspace),
        Command::Resolve(args) => handle_resolve(args, &workspace),
        Command::Backlinks(args) => handle_backlinks(args, &workspace),
        Command::Expand(args) => handle_expand(args, &workspace),
        Command::Refresh(args) => handle_refresh(args, &workspace),
        Command::Completions(args) => {
            generate(args.shell, &mut Cli::command(), "zk", &mut std::io::stdout());
            Ok(())
        }
    }
}
