//! # deadlink-audit
//!
//! Structural auditor for dead anchor links in web pages.
//!
//! Finds every anchor whose `href` is a placeholder (`#`, `/#`, `#/`), assigns it to the
//! page's header, footer or content area, and describes it with a readable label and a
//! location hint. Header and footer links repeat on every page of a site, so they are
//! deduplicated across pages by fingerprinting their container: a link is reported once
//! per container shape, however many pages carry it.
//!
//! ## Quick Start
//!
//! ```rust
//! use deadlink_audit::{audit, HeaderCache};
//!
//! let html = r##"<html><body>
//!     <nav class="navbar"><a href="#">Products</a></nav>
//!     <article><p>Read <a href="#">more</a> here.</p></article>
//!     <footer><a href="/#">Top</a></footer>
//! </body></html>"##;
//!
//! let mut cache = HeaderCache::new();
//! let report = audit(html, &mut cache)?;
//!
//! assert!(report.has_hash_links);
//! assert_eq!(report.header_hash_links[0].text, "Products");
//! assert_eq!(report.hash_links[0].text, "more");
//! assert_eq!(report.footer_hash_links[0].text, "Top");
//! # Ok::<(), deadlink_audit::Error>(())
//! ```
//!
//! ## Sessions
//!
//! [`Auditor`] bundles options and a cache for a crawl over one site.
//! [`SharedHeaderCache`] lets several threads audit pages of the same site against
//! common dedup state.

mod error;
mod options;
mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Zone catalogue and selector helpers.
pub mod selector;

/// Nearest-enclosing zone lookup.
pub mod zone;

/// Dead-link predicate and per-document anchor scan.
pub mod classifier;

/// Anchor labels and location hints.
pub mod text;

/// Structural fingerprints of zone containers.
pub mod fingerprint;

/// Processed-container cache for cross-page deduplication.
pub mod cache;

/// Report and failure shapes.
pub mod report;

/// Character encoding detection and content-type checks.
pub mod encoding;

/// Scan and assembly pipeline.
pub mod audit;

// Public API - re-exports
pub use audit::Auditor;
pub use cache::{CachePolicy, HeaderCache, SharedHeaderCache};
pub use error::{Error, Result};
pub use options::{AuditOptions, DEFAULT_DEAD_HREFS};
pub use report::{AuditFailure, AuditReport, HeaderStats, LinkRecord, ZoneTag};
pub use selector::ZoneKind;

/// Audits one HTML page with default options.
///
/// Zoned links already recorded in `cache` for a container of the same shape are
/// left out of the report, and the newly reported ones are recorded.
///
/// # Errors
///
/// Returns [`Error::InvalidDocument`] for empty input. The cache is not modified
/// when an error is returned.
pub fn audit(html: &str, cache: &mut HeaderCache) -> Result<AuditReport> {
    audit_with_options(html, cache, &AuditOptions::default())
}

/// Audits one HTML page with custom options.
///
/// # Example
///
/// ```rust
/// use deadlink_audit::{audit_with_options, AuditOptions, HeaderCache};
///
/// let html = r##"<header><a href="#">Menu</a></header>"##;
/// let options = AuditOptions {
///     url: Some("https://example.com/".to_string()),
///     deduplicate: false,
///     ..AuditOptions::default()
/// };
///
/// let mut cache = HeaderCache::new();
/// audit_with_options(html, &mut cache, &options)?;
/// let report = audit_with_options(html, &mut cache, &options)?;
///
/// // Without deduplication the header link is reported every time
/// assert_eq!(report.header_hash_links.len(), 1);
/// assert!(report.header_stats.is_none());
/// # Ok::<(), deadlink_audit::Error>(())
/// ```
///
/// # Errors
///
/// Same as [`audit`].
pub fn audit_with_options(html: &str, cache: &mut HeaderCache, options: &AuditOptions) -> Result<AuditReport> {
    audit::run(html, cache, options)
}

/// Audits a fetched response body.
///
/// The body is decoded using the charset from `content_type`, then from `<meta>`
/// declarations, falling back to UTF-8.
///
/// # Example
///
/// ```rust
/// use deadlink_audit::{audit_bytes, AuditOptions, HeaderCache};
///
/// let body = b"<p><a href=\"#\">Caf\xE9</a></p>";
/// let mut cache = HeaderCache::new();
/// let report = audit_bytes(body, Some("text/html; charset=ISO-8859-1"), &mut cache, &AuditOptions::default())?;
/// assert_eq!(report.hash_links[0].text, "Café");
/// # Ok::<(), deadlink_audit::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedContentType`] for non-HTML content types and XML
/// documents such as sitemaps, [`Error::EncodingError`] when the declared charset is
/// unknown and the body is not valid UTF-8, and the errors of [`audit`].
pub fn audit_bytes(
    body: &[u8],
    content_type: Option<&str>,
    cache: &mut HeaderCache,
    options: &AuditOptions,
) -> Result<AuditReport> {
    let html = encoding::decode_body(body, content_type)?;
    audit_with_options(&html, cache, options)
}

/// Audits one HTML page against a cache shared between threads.
///
/// # Errors
///
/// Same as [`audit`].
pub fn audit_shared(html: &str, cache: &SharedHeaderCache, options: &AuditOptions) -> Result<AuditReport> {
    audit::run_shared(html, cache, options)
}
