//! Backlinks handler: notes whose text links to a given note.

use anyhow::Result;
use std::fs;

use super::{ResolvedNote, Workspace, emit_notes, sort_notes};
use crate::cli::BacklinksArgs;
use crate::corpus;
use crate::domain::{NoteId, references};

pub fn handle_backlinks(args: &BacklinksArgs, ws: &Workspace) -> Result<()> {
    let Some(id) = NoteId::find_in(&args.id) else {
        return emit_notes(&[], args.format, ws, "# Referencing notes");
    };

    let mut notes = Vec::new();
    for path in corpus::list_notes(&ws.root, &ws.extension) {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                if ws.verbose {
                    eprintln!("zettel: skipping {}: {}", path.display(), err);
                }
                continue;
            }
        };
        if !references(&text, &id) {
            continue;
        }
        if let Some((note_id, title)) = corpus::note_entry(&path, &ws.extension) {
            notes.push(ResolvedNote {
                id: note_id,
                title,
                path,
            });
        }
    }
    sort_notes(&mut notes, ws, args.sort);

    let heading = format!("Notes referencing {}:", ws.link_style.wrap(&id));
    emit_notes(&notes, args.format, ws, &heading)
}
