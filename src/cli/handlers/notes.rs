//! All-notes listing handler.

use anyhow::Result;

use super::{Workspace, collect_notes, emit_notes, sort_notes};
use crate::cli::NotesArgs;

pub fn handle_notes(args: &NotesArgs, ws: &Workspace) -> Result<()> {
    let mut notes = collect_notes(ws);
    sort_notes(&mut notes, ws, args.sort);
    emit_notes(&notes, args.format, ws, "# All Notes")
}
