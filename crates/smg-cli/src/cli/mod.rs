//! CLI for the smg sitemap generator.

mod commands;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use smg_core::config::{self, ChangeFreq, GenerateOptions, XmlEncoding};
use std::path::PathBuf;

use commands::{run_generate, run_preview};

/// Top-level CLI for the smg sitemap generator.
#[derive(Debug, Parser)]
#[command(name = "smg")]
#[command(about = "smg: merge, deduplicate, and regenerate sitemap.xml files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Inputs and option overrides shared by generate and preview.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// File with URLs to exclude, one per line.
    #[arg(long, value_name = "FILE")]
    pub exclude: Option<PathBuf>,

    /// File with URLs to add, one per line.
    #[arg(long, value_name = "FILE")]
    pub add: Option<PathBuf>,

    /// lastmod date for added URLs (YYYY-MM-DD, default: today).
    #[arg(long, value_name = "DATE")]
    pub lastmod: Option<NaiveDate>,

    /// XML encoding of the generated document (utf-8, utf-16, iso-8859-1).
    #[arg(long, value_name = "NAME")]
    pub encoding: Option<XmlEncoding>,

    /// changefreq applied to every URL in the generated sitemap.
    #[arg(long, value_name = "FREQ")]
    pub changefreq: Option<ChangeFreq>,

    /// priority applied to every URL, 0.0 to 1.0.
    #[arg(long, value_name = "N")]
    pub priority: Option<f64>,

    /// Remove one trailing slash from non-root URLs before comparing.
    #[arg(long)]
    pub trim_trailing_slash: bool,

    /// Convert URLs to lowercase before comparing.
    #[arg(long)]
    pub lowercase: bool,

    /// Keep URLs repeated inside the uploaded sitemap instead of deduplicating them.
    #[arg(long)]
    pub keep_existing_duplicates: bool,
}

impl RunArgs {
    /// Overlays these flags on the configured defaults.
    pub fn apply(&self, defaults: &GenerateOptions) -> GenerateOptions {
        let mut opts = defaults.clone();
        if let Some(encoding) = self.encoding {
            opts.encoding = encoding;
        }
        if let Some(changefreq) = self.changefreq {
            opts.changefreq = changefreq;
        }
        if let Some(priority) = self.priority {
            opts.priority = priority;
        }
        if self.trim_trailing_slash {
            opts.trim_trailing_slash = true;
        }
        if self.lowercase {
            opts.lowercase = true;
        }
        if self.keep_existing_duplicates {
            opts.dedupe_existing = false;
        }
        opts
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Merge additions into an existing sitemap and write the result.
    Generate {
        /// Path to the existing sitemap.xml.
        sitemap: PathBuf,

        #[command(flatten)]
        inputs: RunArgs,

        /// Output path for the generated document.
        #[arg(long, default_value = "sitemap.xml", value_name = "FILE")]
        output: PathBuf,

        /// Print the run report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Run the same pipeline but only print the resulting URL table.
    Preview {
        /// Path to the existing sitemap.xml.
        sitemap: PathBuf,

        #[command(flatten)]
        inputs: RunArgs,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let defaults = config::load_or_init()?;
        tracing::debug!("loaded default options: {:?}", defaults);

        match cli.command {
            CliCommand::Generate {
                sitemap,
                inputs,
                output,
                json,
            } => run_generate(&sitemap, &inputs, &output, json, &defaults)?,
            CliCommand::Preview { sitemap, inputs } => run_preview(&sitemap, &inputs, &defaults)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
