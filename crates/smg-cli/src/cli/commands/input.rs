//! Assemble a core `RunInput` from CLI arguments and files on disk.

use anyhow::{Context, Result};
use smg_core::config::GenerateOptions;
use smg_core::pipeline::RunInput;
use std::fs;
use std::path::Path;

use crate::cli::RunArgs;

pub fn build_run_input(
    sitemap: &Path,
    args: &RunArgs,
    defaults: &GenerateOptions,
) -> Result<RunInput> {
    let options = args.apply(defaults);
    options.validate()?;

    // A nonexistent upload is the core's MissingInput case; any other read
    // failure is a real I/O error.
    let sitemap_bytes = if sitemap.exists() {
        Some(fs::read(sitemap).with_context(|| format!("read sitemap: {}", sitemap.display()))?)
    } else {
        None
    };

    Ok(RunInput {
        sitemap: sitemap_bytes,
        exclude_text: read_url_list(args.exclude.as_deref())?,
        add_text: read_url_list(args.add.as_deref())?,
        add_lastmod: args
            .lastmod
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        options,
    })
}

fn read_url_list(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read URL list: {}", path.display())),
        None => Ok(String::new()),
    }
}
