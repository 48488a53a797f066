//! Namespace-aware extraction of `(loc, lastmod)` pairs from an uploaded
//! sitemap document.

use std::collections::HashSet;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use super::{UrlEntry, SITEMAP_NS};
use crate::config::GenerateOptions;
use crate::error::{ParseErrorKind, SitemapError};
use crate::normalize::normalize_url;

/// Which child of a `<url>` element text is currently being collected for.
#[derive(Clone, Copy, PartialEq)]
enum UrlField {
    Loc,
    Lastmod,
}

/// Parses a decoded sitemap document into its surviving entries, in
/// document order.
///
/// Only elements bound to the sitemap namespace count; the root must be a
/// namespaced `<urlset>`. Per `<url>`: a missing or empty `<loc>` skips
/// the entry silently, `<lastmod>` text is trimmed and kept verbatim
/// (empty means absent). Locations are normalized before any comparison.
/// Entries whose normalized location is in `excludes` are dropped before
/// duplicate tracking, so excluded URLs never count toward dedupe. With
/// `opts.dedupe_existing`, only the first occurrence of each location
/// survives; later ones are dropped silently, not reported.
pub fn parse_sitemap(
    xml: &str,
    excludes: &HashSet<String>,
    opts: &GenerateOptions,
) -> Result<Vec<UrlEntry>, SitemapError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries: Vec<UrlEntry> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let mut saw_root = false;
    let mut in_url = false;
    let mut field: Option<UrlField> = None;
    let mut loc = String::new();
    let mut lastmod = String::new();
    let mut buf = Vec::new();

    loop {
        let (ns, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| SitemapError::Parse(ParseErrorKind::Malformed(e)))?;
        match event {
            Event::Start(e) => {
                let in_sitemap_ns =
                    matches!(ns, ResolveResult::Bound(Namespace(n)) if n == SITEMAP_NS.as_bytes());
                if !saw_root {
                    if !in_sitemap_ns || e.local_name().as_ref() != b"urlset" {
                        return Err(SitemapError::Parse(ParseErrorKind::Structure(
                            "root element is not a sitemap <urlset>".into(),
                        )));
                    }
                    saw_root = true;
                } else if in_sitemap_ns && !in_url && e.local_name().as_ref() == b"url" {
                    in_url = true;
                    loc.clear();
                    lastmod.clear();
                } else if in_url && in_sitemap_ns && e.local_name().as_ref() == b"loc" {
                    field = Some(UrlField::Loc);
                } else if in_url && in_sitemap_ns && e.local_name().as_ref() == b"lastmod" {
                    field = Some(UrlField::Lastmod);
                } else {
                    field = None;
                }
            }
            Event::Text(e) => {
                if let Some(target) = field {
                    let text = e
                        .unescape()
                        .map_err(|e| SitemapError::Parse(ParseErrorKind::Malformed(e)))?;
                    match target {
                        UrlField::Loc => loc.push_str(&text),
                        UrlField::Lastmod => lastmod.push_str(&text),
                    }
                }
            }
            Event::CData(e) => {
                if let Some(target) = field {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    match target {
                        UrlField::Loc => loc.push_str(&text),
                        UrlField::Lastmod => lastmod.push_str(&text),
                    }
                }
            }
            Event::End(e) => {
                let in_sitemap_ns =
                    matches!(ns, ResolveResult::Bound(Namespace(n)) if n == SITEMAP_NS.as_bytes());
                if in_url && in_sitemap_ns && e.local_name().as_ref() == b"url" {
                    finish_entry(&loc, &lastmod, excludes, opts, &mut seen, &mut entries);
                    in_url = false;
                }
                field = None;
            }
            Event::Empty(e) => {
                // An empty <urlset/> is a valid sitemap with no URLs.
                if !saw_root {
                    let in_sitemap_ns = matches!(ns, ResolveResult::Bound(Namespace(n)) if n == SITEMAP_NS.as_bytes());
                    if !in_sitemap_ns || e.local_name().as_ref() != b"urlset" {
                        return Err(SitemapError::Parse(ParseErrorKind::Structure(
                            "root element is not a sitemap <urlset>".into(),
                        )));
                    }
                    saw_root = true;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(SitemapError::Parse(ParseErrorKind::Structure(
            "document has no root element".into(),
        )));
    }

    Ok(entries)
}

fn finish_entry(
    loc: &str,
    lastmod: &str,
    excludes: &HashSet<String>,
    opts: &GenerateOptions,
    seen: &mut HashSet<String>,
    entries: &mut Vec<UrlEntry>,
) {
    let location = normalize_url(loc, opts);
    if location.is_empty() {
        return;
    }
    if excludes.contains(&location) {
        return;
    }
    if opts.dedupe_existing && !seen.insert(location.clone()) {
        return;
    }

    let lastmod = lastmod.trim();
    entries.push(UrlEntry {
        location,
        lastmod: if lastmod.is_empty() {
            None
        } else {
            Some(lastmod.to_string())
        },
    });
}
