//! Search command handler.

use anyhow::Result;

use super::{ResolvedNote, Workspace, emit_notes, sort_notes};
use crate::cli::{NotesArgs, SearchArgs, TagsArgs};
use crate::corpus;
use crate::query::{Query, SearchSpec};

pub fn handle_search(args: &SearchArgs, ws: &Workspace) -> Result<()> {
    // The escape forms short-circuit into the plain listings.
    match Query::parse(&args.spec) {
        Query::AllNotes => {
            let notes_args = NotesArgs {
                sort: args.sort,
                format: args.format,
            };
            super::handle_notes(&notes_args, ws)
        }
        Query::AllTags => {
            let tags_args = TagsArgs {
                counts: false,
                format: args.format,
            };
            super::handle_tags(&tags_args, ws)
        }
        Query::Spec(spec) => search_spec(&spec, args, ws),
    }
}

fn search_spec(spec: &SearchSpec, args: &SearchArgs, ws: &Workspace) -> Result<()> {
    let index = ws.index_builder().build();
    let mut notes: Vec<ResolvedNote> = spec
        .evaluate(&index)
        .into_iter()
        .filter_map(|id| {
            let path = corpus::note_file_by_id(&id, &ws.root, &ws.extension)?;
            let (_, title) = corpus::note_entry(&path, &ws.extension)?;
            Some(ResolvedNote { id, title, path })
        })
        .collect();
    sort_notes(&mut notes, ws, args.sort);

    let heading = format!("# Notes matching search-spec {}", args.spec.trim());
    emit_notes(&notes, args.format, ws, &heading)
}
