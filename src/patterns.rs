//! Compiled regex patterns shared across the auditor.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Any run of whitespace, collapsed to a single space when normalizing markup.
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Leading markers of XML documents (sitemaps, sitemap indexes, feeds).
pub static XML_DOCUMENT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:<\?xml|<urlset|<sitemapindex)").expect("XML_DOCUMENT_START regex")
});

/// `charset=` parameter of a Content-Type header value.
pub static CONTENT_TYPE_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("CONTENT_TYPE_CHARSET regex")
});

/// Match `<meta charset="...">` tag
pub static CHARSET_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("CHARSET_META regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
pub static HTTP_EQUIV_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
        .expect("HTTP_EQUIV_CHARSET regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_run_collapses_mixed_whitespace() {
        assert_eq!(WHITESPACE_RUN.replace_all("a \n\t b", " "), "a b");
    }

    #[test]
    fn xml_document_start_matches_sitemaps_only() {
        assert!(XML_DOCUMENT_START.is_match("<?xml version=\"1.0\"?><urlset>"));
        assert!(XML_DOCUMENT_START.is_match("  <urlset xmlns=\"x\">"));
        assert!(XML_DOCUMENT_START.is_match("<sitemapindex>"));
        assert!(!XML_DOCUMENT_START.is_match("<!DOCTYPE html><html>"));
    }

    #[test]
    fn content_type_charset_extracts_label() {
        let caps = CONTENT_TYPE_CHARSET.captures("text/html; charset=\"ISO-8859-1\"");
        assert_eq!(caps.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("ISO-8859-1"));
    }
}
