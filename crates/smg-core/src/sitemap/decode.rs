//! Decode uploaded sitemap bytes into a string before XML parsing.
//!
//! Uploads are not guaranteed to be UTF-8: this tool itself can emit
//! utf-16 and iso-8859-1 documents. Encoding detection order: BOM, then
//! the `encoding="..."` label in the XML declaration, then UTF-8.

use encoding_rs::{Encoding, UTF_8};

use crate::error::{ParseErrorKind, SitemapError};

pub fn decode_document(bytes: &[u8]) -> Result<String, SitemapError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _bom_len)| encoding)
        .or_else(|| declared_encoding(bytes))
        .unwrap_or(UTF_8);

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(SitemapError::Parse(ParseErrorKind::Encoding(format!(
            "input is not valid {}",
            encoding.name()
        ))));
    }
    Ok(text.into_owned())
}

/// Reads the encoding label out of an ASCII-compatible XML declaration,
/// e.g. `<?xml version="1.0" encoding="iso-8859-1"?>`. Returns None when
/// there is no declaration, no label, or the label is unknown.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(256)];
    let head = std::str::from_utf8(head).ok()?;
    let decl_start = head.find("<?xml")?;
    let decl = &head[decl_start..head[decl_start..].find("?>")? + decl_start];

    let label_start = decl.find("encoding=")? + "encoding=".len();
    let rest = &decl[label_start..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let label = &rest[..rest.find(quote)?];
    Encoding::for_label(label.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8_passes_through() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?><urlset/>"#;
        assert_eq!(decode_document(xml.as_bytes()).unwrap(), xml);
    }

    #[test]
    fn utf8_without_declaration_passes_through() {
        assert_eq!(decode_document(b"<urlset/>").unwrap(), "<urlset/>");
    }

    #[test]
    fn utf16le_with_bom_is_decoded() {
        let xml = r#"<?xml version="1.0" encoding="utf-16"?><urlset/>"#;
        let mut bytes = vec![0xFF, 0xFE];
        for unit in xml.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_document(&bytes).unwrap(), xml);
    }

    #[test]
    fn declared_latin1_is_decoded() {
        let mut bytes = br#"<?xml version="1.0" encoding="iso-8859-1"?><urlset>"#.to_vec();
        bytes.push(0xE9); // é in latin-1, invalid as UTF-8
        bytes.extend_from_slice(b"</urlset>");
        let text = decode_document(&bytes).unwrap();
        assert!(text.contains('\u{e9}'));
    }

    #[test]
    fn invalid_utf8_without_declaration_is_an_error() {
        let err = decode_document(&[b'<', 0xFF, 0xFE, b'>']).unwrap_err();
        assert!(err.is_parse());
    }
}
