//! `smg preview <sitemap>` – run the pipeline and print the URL table
//! without writing anything.

use anyhow::Result;
use smg_core::config::GenerateOptions;
use smg_core::pipeline;
use std::path::Path;

use super::input::build_run_input;
use crate::cli::RunArgs;

pub fn run_preview(sitemap: &Path, args: &RunArgs, defaults: &GenerateOptions) -> Result<()> {
    let input = build_run_input(sitemap, args, defaults)?;
    let result = pipeline::run(&input)?;

    if result.entries.is_empty() {
        println!("No URLs in the final sitemap.");
    } else {
        println!("{:<60} {}", "URL", "LASTMOD");
        for entry in &result.entries {
            println!(
                "{:<60} {}",
                entry.location,
                entry.lastmod.as_deref().unwrap_or("-")
            );
        }
    }
    println!();
    println!(
        "Total URLs: {} ({} duplicate additions rejected)",
        result.report.total, result.report.duplicate_count
    );
    Ok(())
}
