//! Deterministic sitemap document writing.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use super::{UrlEntry, SITEMAP_NS};
use crate::config::{GenerateOptions, XmlEncoding};
use crate::error::SitemapError;

/// Renders the final entry list into a complete sitemap document encoded
/// per `opts.encoding`.
///
/// Child order inside each `<url>` is fixed: `loc`, `lastmod` (only when
/// present), `changefreq`, `priority`. changefreq and priority come from
/// the options and are uniform across all entries; priority is rendered
/// with exactly one decimal digit. Same entries + options always produce
/// byte-identical output.
pub fn write_sitemap(entries: &[UrlEntry], opts: &GenerateOptions) -> Result<Vec<u8>, SitemapError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    let priority = format!("{:.1}", opts.priority);

    writer
        .write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some(opts.encoding.label()),
            None,
        )))
        .map_err(write_err)?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset)).map_err(write_err)?;

    for entry in entries {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(write_err)?;
        text_element(&mut writer, "loc", &entry.location)?;
        if let Some(lastmod) = &entry.lastmod {
            text_element(&mut writer, "lastmod", lastmod)?;
        }
        text_element(&mut writer, "changefreq", opts.changefreq.as_str())?;
        text_element(&mut writer, "priority", &priority)?;
        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .map_err(write_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(write_err)?;

    let xml = String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| SitemapError::Unexpected(format!("serialized sitemap is not UTF-8: {e}")))?;
    Ok(encode_output(&xml, opts.encoding))
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), SitemapError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(write_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_err)?;
    Ok(())
}

fn write_err<E: std::fmt::Display>(e: E) -> SitemapError {
    SitemapError::Unexpected(format!("serialize sitemap: {e}"))
}

/// The writer always produces UTF-8; re-encode to the declared encoding.
fn encode_output(xml: &str, encoding: XmlEncoding) -> Vec<u8> {
    match encoding {
        XmlEncoding::Utf8 => xml.as_bytes().to_vec(),
        // The Encoding Standard maps the iso-8859-1 label to windows-1252.
        XmlEncoding::Iso8859_1 => {
            let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(xml);
            bytes.into_owned()
        }
        // encoding_rs has no UTF-16 encoder, so emit UTF-16LE by hand,
        // BOM first so the byte order is self-describing.
        XmlEncoding::Utf16 => {
            let mut out = Vec::with_capacity(2 + xml.len() * 2);
            out.extend_from_slice(&[0xFF, 0xFE]);
            for unit in xml.encode_utf16() {
                out.extend_from_slice(&unit.to_le_bytes());
            }
            out
        }
    }
}
