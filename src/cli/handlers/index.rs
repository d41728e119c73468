//! Index dump handler: the raw note id to tag set mapping.

use anyhow::Result;

use super::Workspace;
use crate::cli::IndexArgs;
use crate::cli::output::{Output, OutputFormat};
use crate::corpus;
use crate::domain::Tag;

pub fn handle_index(args: &IndexArgs, ws: &Workspace) -> Result<()> {
    let index = ws.index_builder().build();

    match args.format {
        OutputFormat::Human => {
            if index.is_empty() {
                println!("No tagged notes found.");
            } else {
                for (id, tags) in &index {
                    let tags: Vec<&str> = tags.iter().map(Tag::as_str).collect();
                    println!("{}: {}", id, tags.join(" "));
                }
                println!();
                println!("{} note(s)", index.len());
            }
        }
        OutputFormat::Json => {
            let output = Output::new(&index);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            for id in index.keys() {
                if let Some(path) = corpus::note_file_by_id(id, &ws.root, &ws.extension) {
                    println!("{}", path.display());
                }
            }
        }
    }
    Ok(())
}
