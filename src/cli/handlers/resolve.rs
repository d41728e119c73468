//! Resolve command handler: note id (or link text) to file path.

use anyhow::Result;

use super::Workspace;
use crate::cli::ResolveArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::corpus;
use crate::domain::NoteId;
use crate::resolve;

pub fn handle_resolve(args: &ResolveArgs, ws: &Workspace) -> Result<()> {
    // Accept a bare id or any text containing one, e.g. '[[201901010000]]'
    // or a full note filename.
    let found = NoteId::find_in(&args.id)
        .and_then(|id| resolve::resolve(&id, &ws.root, &ws.extension).map(|path| (id, path)));

    match args.format {
        OutputFormat::Human => match &found {
            Some((_, path)) => println!("{}", path.display()),
            None => println!("No note found for '{}'.", args.id),
        },
        OutputFormat::Paths => {
            if let Some((_, path)) = &found {
                println!("{}", path.display());
            }
        }
        OutputFormat::Json => {
            let listing = found.as_ref().map(|(id, path)| NoteListing {
                id: id.to_string(),
                title: corpus::note_entry(path, &ws.extension)
                    .map(|(_, title)| title)
                    .unwrap_or_default(),
                path: path.to_string_lossy().to_string(),
            });
            let output = Output::new(listing);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
