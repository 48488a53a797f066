//! Run summary for display or JSON output.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::sitemap::UrlEntry;

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Number of URLs in the final sitemap.
    pub total: usize,
    /// Number of rejected addition lines, counting repeats.
    pub duplicate_count: usize,
    /// Rejected URLs for display: deduplicated and sorted.
    pub duplicates: Vec<String>,
}

/// Pure projection of the reconciled result; no failure modes.
pub fn summarize(entries: &[UrlEntry], duplicates: &[String]) -> Report {
    let display: BTreeSet<&String> = duplicates.iter().collect();
    Report {
        total: entries.len(),
        duplicate_count: duplicates.len(),
        duplicates: display.into_iter().cloned().collect(),
    }
}
