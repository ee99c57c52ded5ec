//! Report types for audit output.
//!
//! This module defines the JSON-serializable report returned for one page, and the
//! failure shape callers emit when a page cannot be audited.

use serde::{Deserialize, Serialize};

use crate::selector::ZoneKind;
use crate::Error;

/// Zone annotation of a dead link found inside a header or footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTag {
    /// Zone kind (`header` or `footer`).
    pub kind: ZoneKind,

    /// Catalogue rule that matched the container (`nav`, `.navbar`, `#footer`, ...).
    pub selector_label: String,

    /// Container description: tag, then ` (id=...)` and ` (class=...)` when present.
    pub container: String,
}

/// One dead-link occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Readable label of the anchor.
    pub text: String,

    /// The `href` exactly as written in the page.
    pub href: String,

    /// Where the anchor sits on the page.
    pub context: String,

    /// Zone the anchor belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<ZoneTag>,
}

impl LinkRecord {
    /// Zone kind of the record, `None` for content-area links.
    #[must_use]
    pub fn zone_kind(&self) -> Option<ZoneKind> {
        self.zone.as_ref().map(|z| z.kind)
    }
}

/// Deduplication counters for one audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStats {
    /// Container fingerprints seen for the first time during this audit.
    pub new_headers_found: usize,

    /// Zoned links suppressed because they were already reported.
    pub skipped_links: usize,

    /// Fingerprints held by the cache after this audit.
    pub total_headers_processed: usize,
}

/// Result of auditing one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Always `true`; failures use [`AuditFailure`].
    pub success: bool,

    /// Page URL, when the caller supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Whether any dead link was reported, in any zone.
    pub has_hash_links: bool,

    /// Dead links outside header and footer zones, in document order.
    pub hash_links: Vec<LinkRecord>,

    /// Whether `header_hash_links` is non-empty.
    pub has_header_hash_links: bool,

    /// Dead links inside header/navigation zones, in document order.
    pub header_hash_links: Vec<LinkRecord>,

    /// Whether `footer_hash_links` is non-empty.
    pub has_footer_hash_links: bool,

    /// Dead links inside footer zones, in document order.
    pub footer_hash_links: Vec<LinkRecord>,

    /// Deduplication counters; absent when deduplication is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_stats: Option<HeaderStats>,
}

impl AuditReport {
    /// Build a report from the three buckets, deriving the summary flags.
    #[must_use]
    pub fn new(
        url: Option<String>,
        hash_links: Vec<LinkRecord>,
        header_hash_links: Vec<LinkRecord>,
        footer_hash_links: Vec<LinkRecord>,
        header_stats: Option<HeaderStats>,
    ) -> Self {
        Self {
            success: true,
            url,
            has_hash_links: !(hash_links.is_empty()
                && header_hash_links.is_empty()
                && footer_hash_links.is_empty()),
            has_header_hash_links: !header_hash_links.is_empty(),
            has_footer_hash_links: !footer_hash_links.is_empty(),
            hash_links,
            header_hash_links,
            footer_hash_links,
            header_stats,
        }
    }

    /// Total number of reported dead links across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.hash_links.len() + self.header_hash_links.len() + self.footer_hash_links.len()
    }

    /// All reported links: content area first, then header, then footer.
    pub fn all_links(&self) -> impl Iterator<Item = &LinkRecord> {
        self.hash_links
            .iter()
            .chain(&self.header_hash_links)
            .chain(&self.footer_hash_links)
    }
}

/// Failure shape for a page that could not be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFailure {
    /// Always `false`.
    pub success: bool,

    /// Page URL, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Error message.
    pub error: String,

    /// Always `false`.
    pub has_hash_links: bool,

    /// Always empty.
    pub hash_links: Vec<LinkRecord>,

    /// Always empty.
    pub header_hash_links: Vec<LinkRecord>,

    /// Always empty.
    pub footer_hash_links: Vec<LinkRecord>,
}

impl AuditFailure {
    /// Failure shape for `error`.
    #[must_use]
    pub fn from_error(url: Option<String>, error: &Error) -> Self {
        Self {
            success: false,
            url,
            error: error.to_string(),
            has_hash_links: false,
            hash_links: Vec::new(),
            header_hash_links: Vec::new(),
            footer_hash_links: Vec::new(),
        }
    }
}
