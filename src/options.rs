//! Configuration options for auditing.
//!
//! The `AuditOptions` struct controls the dead-link predicate, the context and
//! fingerprint bounds, and whether zoned links are deduplicated across pages.

use crate::fingerprint::DEFAULT_MARKUP_LEN;
use crate::text::{DEFAULT_CONTEXT_DEPTH, DEFAULT_EXCERPT_LEN};

/// `href` values treated as dead links, compared after trimming.
pub const DEFAULT_DEAD_HREFS: &[&str] = &["#", "/#", "#/"];

/// Configuration options for auditing.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use deadlink_audit::AuditOptions;
///
/// let options = AuditOptions {
///     url: Some("https://example.com/".to_string()),
///     deduplicate: false,
///     ..AuditOptions::default()
/// };
/// assert_eq!(options.context_depth, 3);
/// ```
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// URL of the audited page, echoed into the report.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// `href` values that make an anchor dead.
    ///
    /// Compared against the trimmed attribute value. An empty or missing `href`
    /// is never dead, even if `""` is listed here.
    ///
    /// Default: `["#", "/#", "#/"]`
    pub dead_hrefs: Vec<String>,

    /// Ancestor levels searched for an id or class when describing context.
    ///
    /// Default: `3`
    pub context_depth: usize,

    /// Maximum characters of surrounding text quoted in a context string.
    ///
    /// Default: `100`
    pub context_excerpt_len: usize,

    /// Characters of normalized container markup hashed into a fingerprint.
    ///
    /// Default: `200`
    pub fingerprint_markup_len: usize,

    /// Suppress zoned links already reported for a container of the same shape.
    ///
    /// When disabled, every zoned link is reported, the cache is left untouched and
    /// the report carries no `headerStats`.
    ///
    /// Default: `true`
    pub deduplicate: bool,
}

impl AuditOptions {
    /// Whether `href` (as written in the page) is dead under these options.
    #[must_use]
    pub fn is_dead_href(&self, href: &str) -> bool {
        let href = href.trim();
        !href.is_empty() && self.dead_hrefs.iter().any(|dead| dead == href)
    }
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            url: None,
            dead_hrefs: DEFAULT_DEAD_HREFS.iter().map(|s| (*s).to_string()).collect(),
            context_depth: DEFAULT_CONTEXT_DEPTH,
            context_excerpt_len: DEFAULT_EXCERPT_LEN,
            fingerprint_markup_len: DEFAULT_MARKUP_LEN,
            deduplicate: true,
        }
    }
}
