//! All-tags listing handler.

use anyhow::Result;

use super::Workspace;
use crate::cli::TagsArgs;
use crate::cli::output::{Output, OutputFormat, TagListing};

pub fn handle_tags(args: &TagsArgs, ws: &Workspace) -> Result<()> {
    let tags = ws.index_builder().all_tags();

    match args.format {
        OutputFormat::Human => {
            if tags.is_empty() {
                println!("No tags found.");
            } else {
                for (tag, count) in &tags {
                    if args.counts {
                        println!("{} ({})", tag, count);
                    } else {
                        println!("{}", tag);
                    }
                }
                println!();
                println!("{} tag(s)", tags.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TagListing> = tags
                .iter()
                .map(|(tag, count)| TagListing {
                    name: tag.to_string(),
                    count: args.counts.then_some(*count),
                })
                .collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            // Tags have no path; print bare names, one per line.
            for tag in tags.keys() {
                println!("{}", tag);
            }
        }
    }

    if let Some(sidecar) = ws.results_file() {
        sidecar.write_tags("# All Tags", tags.keys())?;
    }
    Ok(())
}
