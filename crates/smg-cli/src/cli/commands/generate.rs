//! `smg generate <sitemap>` – merge, deduplicate, and write the final sitemap.

use anyhow::{Context, Result};
use smg_core::config::GenerateOptions;
use smg_core::pipeline;
use std::fs;
use std::path::Path;

use super::input::build_run_input;
use crate::cli::RunArgs;

pub fn run_generate(
    sitemap: &Path,
    args: &RunArgs,
    output: &Path,
    json: bool,
    defaults: &GenerateOptions,
) -> Result<()> {
    let input = build_run_input(sitemap, args, defaults)?;
    let result = pipeline::run(&input)?;

    fs::write(output, &result.xml)
        .with_context(|| format!("write sitemap: {}", output.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
        return Ok(());
    }

    println!(
        "Generated {} with {} URLs.",
        output.display(),
        result.report.total
    );
    if result.report.duplicate_count > 0 {
        println!(
            "Duplicates detected in added URLs: {} (excluded from the final sitemap)",
            result.report.duplicate_count
        );
        for url in &result.report.duplicates {
            println!("  {url}");
        }
    }
    Ok(())
}
