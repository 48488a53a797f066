//! End-to-end pipeline tests: uploaded document in, serialized sitemap
//! plus report out.

use chrono::NaiveDate;
use smg_core::config::{GenerateOptions, XmlEncoding};
use smg_core::error::SitemapError;
use smg_core::pipeline::{run, RunInput, RunOutput};
use smg_core::sitemap::SITEMAP_NS;

fn input(sitemap: &str, exclude: &str, add: &str) -> RunInput {
    RunInput {
        sitemap: Some(sitemap.as_bytes().to_vec()),
        exclude_text: exclude.to_string(),
        add_text: add.to_string(),
        add_lastmod: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        options: GenerateOptions::default(),
    }
}

fn locations(output: &RunOutput) -> Vec<&str> {
    output.entries.iter().map(|e| e.location.as_str()).collect()
}

#[test]
fn merge_with_exclusion_and_duplicate_detection() {
    // Existing a (with lastmod) and b; b excluded; a re-added (duplicate)
    // and c added fresh.
    let sitemap = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<urlset xmlns="{SITEMAP_NS}">
  <url><loc>https://ex.com/a</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>https://ex.com/b</loc></url>
</urlset>"#
    );
    let output = run(&input(
        &sitemap,
        "https://ex.com/b",
        "https://ex.com/a\nhttps://ex.com/c",
    ))
    .unwrap();

    assert_eq!(locations(&output), vec!["https://ex.com/a", "https://ex.com/c"]);
    assert_eq!(output.entries[0].lastmod.as_deref(), Some("2024-01-01"));
    assert_eq!(output.entries[1].lastmod.as_deref(), Some("2025-06-01"));
    assert_eq!(output.report.total, 2);
    assert_eq!(output.report.duplicate_count, 1);
    assert_eq!(output.report.duplicates, vec!["https://ex.com/a".to_string()]);

    let xml = String::from_utf8(output.xml).unwrap();
    assert!(xml.contains("<loc>https://ex.com/a</loc>"));
    assert!(!xml.contains("<loc>https://ex.com/b</loc>"));
    assert!(xml.contains("<lastmod>2025-06-01</lastmod>"));
}

#[test]
fn excluded_url_readded_is_a_fresh_addition_not_a_duplicate() {
    // Exclusion wins over duplicate detection: once b is excluded from the
    // existing set, adding b back makes it a new entry with the run date.
    let sitemap = format!(
        r#"<urlset xmlns="{SITEMAP_NS}"><url><loc>https://ex.com/b</loc><lastmod>2020-01-01</lastmod></url></urlset>"#
    );
    let output = run(&input(&sitemap, "https://ex.com/b", "https://ex.com/b")).unwrap();

    assert_eq!(locations(&output), vec!["https://ex.com/b"]);
    assert_eq!(output.entries[0].lastmod.as_deref(), Some("2025-06-01"));
    assert_eq!(output.report.duplicate_count, 0);
}

#[test]
fn self_duplicates_in_upload_are_deduped_silently() {
    // Scenario: the uploaded sitemap lists the same URL twice. With
    // dedupe_existing the first occurrence survives with its lastmod, and
    // the duplicate report stays empty.
    let sitemap = format!(
        r#"<urlset xmlns="{SITEMAP_NS}">
  <url><loc>https://ex.com/x</loc><lastmod>2023-03-03</lastmod></url>
  <url><loc>https://ex.com/x</loc><lastmod>2024-04-04</lastmod></url>
</urlset>"#
    );
    let output = run(&input(&sitemap, "", "")).unwrap();

    assert_eq!(locations(&output), vec!["https://ex.com/x"]);
    assert_eq!(output.entries[0].lastmod.as_deref(), Some("2023-03-03"));
    assert_eq!(output.report.total, 1);
    assert_eq!(output.report.duplicate_count, 0);
}

#[test]
fn no_two_output_entries_share_a_location() {
    let sitemap = format!(
        r#"<urlset xmlns="{SITEMAP_NS}">
  <url><loc>https://ex.com/a</loc></url>
  <url><loc>https://ex.com/a</loc></url>
  <url><loc>https://ex.com/b</loc></url>
</urlset>"#
    );
    let output = run(&input(
        &sitemap,
        "",
        "https://ex.com/a\nhttps://ex.com/c\nhttps://ex.com/c\nhttps://ex.com/b",
    ))
    .unwrap();

    let mut seen = locations(&output);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), output.entries.len());
    assert_eq!(output.report.duplicate_count, 3);
}

#[test]
fn normalization_applies_across_upload_and_additions() {
    let mut run_input = input(
        &format!(
            r#"<urlset xmlns="{SITEMAP_NS}"><url><loc>https://EX.com/Page/</loc></url></urlset>"#
        ),
        "",
        "https://ex.com/page",
    );
    run_input.options.lowercase = true;
    run_input.options.trim_trailing_slash = true;
    let output = run(&run_input).unwrap();

    // The addition collides with the normalized existing entry.
    assert_eq!(locations(&output), vec!["https://ex.com/page"]);
    assert_eq!(output.report.duplicate_count, 1);
}

#[test]
fn malformed_xml_fails_with_parse_error_and_no_output() {
    let result = run(&input("this is not xml <", "", "https://ex.com/a"));
    match result {
        Err(err) => assert!(err.is_parse()),
        Ok(_) => panic!("malformed XML must not produce a sitemap"),
    }
}

#[test]
fn own_output_round_trips_through_the_parser() {
    let sitemap = format!(
        r#"<urlset xmlns="{SITEMAP_NS}"><url><loc>https://ex.com/a</loc><lastmod>2024-01-01</lastmod></url></urlset>"#
    );
    let first = run(&input(&sitemap, "", "https://ex.com/b?x=1&y=2")).unwrap();

    let mut second_input = input("", "", "");
    second_input.sitemap = Some(first.xml.clone());
    let second = run(&second_input).unwrap();

    assert_eq!(first.entries, second.entries);
}

#[test]
fn utf16_output_round_trips_through_the_decoder() {
    let sitemap = format!(
        r#"<urlset xmlns="{SITEMAP_NS}"><url><loc>https://ex.com/a</loc></url></urlset>"#
    );
    let mut run_input = input(&sitemap, "", "https://ex.com/b");
    run_input.options.encoding = XmlEncoding::Utf16;
    let first = run(&run_input).unwrap();
    assert_eq!(&first.xml[..2], &[0xFF, 0xFE]);

    let mut second_input = input("", "", "");
    second_input.sitemap = Some(first.xml.clone());
    second_input.options.encoding = XmlEncoding::Utf16;
    let second = run(&second_input).unwrap();

    assert_eq!(first.entries, second.entries);
}

#[test]
fn empty_add_and_exclude_lists_preserve_the_upload() {
    let sitemap = format!(
        r#"<urlset xmlns="{SITEMAP_NS}">
  <url><loc>https://ex.com/a</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>https://ex.com/b</loc></url>
</urlset>"#
    );
    let output = run(&input(&sitemap, "\n  \n", "\n\n")).unwrap();
    assert_eq!(locations(&output), vec!["https://ex.com/a", "https://ex.com/b"]);
    assert_eq!(output.report.total, 2);
    assert_eq!(output.report.duplicate_count, 0);
    assert!(matches!(
        run(&RunInput {
            sitemap: None,
            ..input(&sitemap, "", "")
        }),
        Err(SitemapError::MissingInput)
    ));
}
