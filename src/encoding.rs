//! Decoding of fetched page bodies.
//!
//! The fetch layer hands over raw bytes and the response's Content-Type. This module
//! decides whether the body is something the auditor can inspect and converts it to
//! UTF-8, taking the charset from the header first and from meta tags second.

use encoding_rs::{Encoding, UTF_8};
use log::warn;

use crate::patterns::{CHARSET_META, CONTENT_TYPE_CHARSET, HTTP_EQUIV_CHARSET, XML_DOCUMENT_START};
use crate::{Error, Result};

/// Number of leading bytes searched for meta charset declarations.
const META_SNIFF_LEN: usize = 1024;

/// Whether a Content-Type value names an HTML or text document.
///
/// A missing header is accepted; servers that omit it usually serve HTML.
#[must_use]
pub fn is_supported_content_type(content_type: Option<&str>) -> bool {
    content_type.is_none_or(|ct| {
        let ct = ct.to_ascii_lowercase();
        ct.contains("html") || ct.contains("text")
    })
}

/// Whether the body is an XML document such as a sitemap or sitemap index.
///
/// True when the Content-Type mentions `xml` (but not XHTML) or the body starts with
/// an XML prolog, `<urlset` or `<sitemapindex`. An HTML Content-Type, or an `<html`
/// tag near the top of the body, marks an XHTML page instead.
#[must_use]
pub fn looks_like_xml(content_type: Option<&str>, body: &[u8]) -> bool {
    if let Some(ct) = content_type.map(str::to_ascii_lowercase) {
        if ct.contains("html") {
            return false;
        }
        if ct.contains("xml") {
            return true;
        }
    }
    let head = String::from_utf8_lossy(&body[..body.len().min(META_SNIFF_LEN)]);
    XML_DOCUMENT_START.is_match(&head) && !head.to_ascii_lowercase().contains("<html")
}

/// Charset label declared in a Content-Type value.
fn content_type_charset(content_type: &str) -> Option<&str> {
    CONTENT_TYPE_CHARSET
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Charset label declared by `<meta charset>` or `<meta http-equiv="Content-Type">`.
fn meta_charset(head: &str) -> Option<String> {
    CHARSET_META
        .captures(head)
        .or_else(|| HTTP_EQUIV_CHARSET.captures(head))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Detected encoding and whether an unrecognised label was declared along the way.
fn detect(body: &[u8], content_type: Option<&str>) -> (&'static Encoding, Option<String>) {
    let mut unknown_label = None;

    if let Some(label) = content_type.and_then(content_type_charset) {
        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => return (encoding, None),
            None => {
                warn!("unknown charset {label:?} in Content-Type; falling back to meta tags");
                unknown_label = Some(label.to_string());
            }
        }
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(META_SNIFF_LEN)]);
    if let Some(label) = meta_charset(&head) {
        match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => return (encoding, None),
            None => {
                warn!("unknown charset {label:?} in meta tag; assuming UTF-8");
                unknown_label.get_or_insert(label);
            }
        }
    }

    (UTF_8, unknown_label)
}

/// Detect the character encoding of a fetched body.
///
/// Looks at, in order: the Content-Type `charset=` parameter, `<meta charset>`,
/// `<meta http-equiv="Content-Type">`, then defaults to UTF-8.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    detect(body, content_type).0
}

/// Convert a fetched body to a UTF-8 string ready for parsing.
///
/// Rejects non-HTML content types and XML documents with
/// [`Error::UnsupportedContentType`]. Invalid byte sequences are replaced with
/// U+FFFD, except when an unrecognised charset was declared and the body is not
/// valid UTF-8 either, which yields [`Error::EncodingError`].
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> Result<String> {
    if !is_supported_content_type(content_type) {
        return Err(Error::UnsupportedContentType(
            content_type.unwrap_or_default().to_string(),
        ));
    }
    if looks_like_xml(content_type, body) {
        return Err(Error::UnsupportedContentType("XML document".to_string()));
    }

    let (encoding, unknown_label) = detect(body, content_type);
    if encoding == UTF_8 {
        return match (std::str::from_utf8(body), unknown_label) {
            (Ok(text), _) => Ok(text.to_string()),
            (Err(_), Some(label)) => Err(Error::EncodingError(format!(
                "unknown charset {label:?} and body is not valid UTF-8"
            ))),
            (Err(_), None) => Ok(String::from_utf8_lossy(body).into_owned()),
        };
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(body);
    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_and_text_content_types_are_supported() {
        assert!(is_supported_content_type(Some("text/html; charset=utf-8")));
        assert!(is_supported_content_type(Some("application/xhtml+xml")));
        assert!(is_supported_content_type(Some("TEXT/PLAIN")));
        assert!(is_supported_content_type(None));
        assert!(!is_supported_content_type(Some("application/pdf")));
        assert!(!is_supported_content_type(Some("image/png")));
    }

    #[test]
    fn xml_detected_from_header_or_body() {
        assert!(looks_like_xml(Some("application/xml"), b"<html></html>"));
        assert!(looks_like_xml(None, b"<?xml version=\"1.0\"?><urlset></urlset>"));
        assert!(looks_like_xml(Some("text/plain"), b"\n<sitemapindex></sitemapindex>"));
        assert!(!looks_like_xml(Some("text/html"), b"<!DOCTYPE html><html></html>"));
        assert!(!looks_like_xml(Some("application/xhtml+xml"), b"<html></html>"));
        assert!(!looks_like_xml(None, b"<?xml version=\"1.0\"?>\n<html xmlns=\"http://www.w3.org/1999/xhtml\"></html>"));
    }

    #[test]
    fn header_charset_wins_over_meta() {
        let body = br#"<html><head><meta charset="utf-8"></head></html>"#;
        let encoding = detect_encoding(body, Some("text/html; charset=windows-1252"));
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn meta_charset_used_without_header_charset() {
        let body = br#"<html><head><meta charset="ISO-8859-1"></head></html>"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(detect_encoding(body, Some("text/html")).name(), "windows-1252");
    }

    #[test]
    fn http_equiv_charset_is_recognised() {
        let body = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        assert_eq!(detect_encoding(body, None).name(), "windows-1252");
    }

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<html><body>Test</body></html>", None), UTF_8);
    }

    #[test]
    fn decode_transcodes_legacy_charset() {
        let body = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        let text = decode_body(body, Some("text/html")).unwrap();
        assert!(text.contains("Café"));
    }

    #[test]
    fn decode_rejects_non_html() {
        let err = decode_body(b"%PDF-1.4", Some("application/pdf")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedContentType(ct) if ct == "application/pdf"));
    }

    #[test]
    fn decode_rejects_sitemaps() {
        let err = decode_body(b"<?xml version=\"1.0\"?><urlset/>", Some("text/xml")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedContentType(_)));
    }

    #[test]
    fn decode_invalid_utf8_is_lossy_without_bad_label() {
        let text = decode_body(b"<p>Test \xFF\xFE Invalid</p>", None).unwrap();
        assert!(text.contains("Test"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn decode_fails_for_unknown_label_and_invalid_utf8() {
        let err = decode_body(b"<p>\xFF\xFE</p>", Some("text/html; charset=x-klingon")).unwrap_err();
        assert!(matches!(err, Error::EncodingError(_)));
    }

    #[test]
    fn decode_accepts_valid_utf8_despite_unknown_label() {
        let text = decode_body("<p>naïve</p>".as_bytes(), Some("text/html; charset=x-klingon")).unwrap();
        assert_eq!(text, "<p>naïve</p>");
    }
}
