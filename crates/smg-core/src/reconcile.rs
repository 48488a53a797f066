//! Merge user-supplied additions into the existing entry list.

use std::collections::HashSet;

use crate::sitemap::UrlEntry;

/// Outcome of merging additions into the existing entries.
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// Existing entries first (unchanged, in document order), then the
    /// accepted additions in input order.
    pub entries: Vec<UrlEntry>,
    /// Every rejected addition occurrence, repeats preserved. An addition
    /// is rejected when its location is already in the existing set or was
    /// already accepted earlier in the same pass.
    pub duplicates: Vec<String>,
}

/// Merges normalized additions into the filtered existing entries.
///
/// Each accepted addition is stamped with the single `add_lastmod` date;
/// existing entries keep whatever lastmod they came with. Cannot fail;
/// the addition list may be empty.
pub fn reconcile(existing: Vec<UrlEntry>, additions: &[String], add_lastmod: &str) -> Reconciled {
    let mut taken: HashSet<String> = existing.iter().map(|e| e.location.clone()).collect();
    let mut entries = existing;
    let mut duplicates = Vec::new();

    for addition in additions {
        if addition.is_empty() {
            continue;
        }
        if taken.contains(addition) {
            duplicates.push(addition.clone());
            continue;
        }
        entries.push(UrlEntry {
            location: addition.clone(),
            lastmod: Some(add_lastmod.to_string()),
        });
        taken.insert(addition.clone());
    }

    Reconciled { entries, duplicates }
}
