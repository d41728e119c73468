//! Overview expansion handlers.

use anyhow::{Context, Result};
use std::fs;

use super::Workspace;
use crate::cli::{ExpandArgs, RefreshArgs};
use crate::resolve;

/// Expands every note link in the given file to stdout.
pub fn handle_expand(args: &ExpandArgs, ws: &Workspace) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let expanded = resolve::expand_links(&text, &ws.root, &ws.extension, !args.keep_links);
    print!("{expanded}");
    if !expanded.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Re-embeds every expanded block in the given file, in place.
pub fn handle_refresh(args: &RefreshArgs, ws: &Workspace) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let refreshed = resolve::refresh(&text, &ws.root, &ws.extension);
    fs::write(&args.file, &refreshed)
        .with_context(|| format!("failed to write {}", args.file.display()))?;

    if ws.verbose {
        eprintln!("refreshed {}", args.file.display());
    }
    Ok(())
}
