//! URL normalization applied before any comparison.
//!
//! Every location from the uploaded sitemap, the exclude list, and the add
//! list passes through [`normalize_url`] so that membership checks and
//! duplicate detection always compare canonical strings.

use crate::config::GenerateOptions;

/// Normalizes a raw URL string under the given options.
///
/// - Trims leading/trailing whitespace
/// - Lowercases the whole string if `opts.lowercase` (plain case folding,
///   applied to scheme and host as well)
/// - Strips exactly one trailing `/` if `opts.trim_trailing_slash`, unless
///   the string is a bare domain root like `https://example.com/`
///
/// Root detection counts characters instead of parsing the URL: a string
/// that ends with `/`, contains `://`, and has more than three `/` total
/// has a path below the root and loses the trailing slash. Anything else
/// is left alone. A URL with `://` embedded in a query string can be
/// misclassified by this rule.
pub fn normalize_url(url: &str, opts: &GenerateOptions) -> String {
    let mut u = url.trim().to_string();
    if opts.lowercase {
        u = u.to_lowercase();
    }
    if opts.trim_trailing_slash
        && u.len() > 1
        && u.ends_with('/')
        && u.contains("://")
        && u.bytes().filter(|&b| b == b'/').count() > 3
    {
        u.pop();
    }
    u
}

/// Splits a raw text block into normalized, non-blank lines.
///
/// Used for both the exclude list and the add list: one URL per line,
/// blank and whitespace-only lines dropped, every survivor normalized.
pub fn clean_lines(raw: &str, opts: &GenerateOptions) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| normalize_url(line, opts))
        .collect()
}
