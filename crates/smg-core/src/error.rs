//! Error kinds for a sitemap generation run.

use std::fmt;

/// Terminal failure of one generation run. There is no partial output:
/// either the whole pipeline succeeds or one of these is returned.
#[derive(Debug)]
pub enum SitemapError {
    /// No sitemap document was supplied.
    MissingInput,
    /// The uploaded document is not usable sitemap XML.
    Parse(ParseErrorKind),
    /// Any other failure during the run.
    Unexpected(String),
}

/// Why the uploaded document failed to parse.
#[derive(Debug)]
pub enum ParseErrorKind {
    /// Bytes could not be decoded with the detected encoding.
    Encoding(String),
    /// The XML itself is not well-formed.
    Malformed(quick_xml::Error),
    /// Well-formed XML, but not a namespaced sitemap urlset.
    Structure(String),
}

impl fmt::Display for SitemapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SitemapError::MissingInput => {
                write!(f, "no sitemap document supplied; provide an existing sitemap.xml first")
            }
            SitemapError::Parse(kind) => match kind {
                ParseErrorKind::Encoding(detail) => {
                    write!(f, "failed to parse the uploaded XML: {detail}")
                }
                ParseErrorKind::Malformed(e) => {
                    write!(f, "failed to parse the uploaded XML: {e}")
                }
                ParseErrorKind::Structure(detail) => {
                    write!(f, "failed to parse the uploaded XML: {detail}")
                }
            },
            SitemapError::Unexpected(detail) => write!(f, "unexpected error: {detail}"),
        }
    }
}

impl std::error::Error for SitemapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SitemapError::Parse(ParseErrorKind::Malformed(e)) => Some(e),
            _ => None,
        }
    }
}

impl SitemapError {
    /// True if this is the parse-failure kind (as opposed to missing input
    /// or an unexpected failure). Callers report parse failures distinctly.
    pub fn is_parse(&self) -> bool {
        matches!(self, SitemapError::Parse(_))
    }
}
