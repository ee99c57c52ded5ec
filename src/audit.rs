//! Audit pipeline.
//!
//! Parse → classify anchors → label and describe each dead anchor → deduplicate zoned
//! anchors against the header cache → assemble the report.
//!
//! Scanning produces owned candidates and never touches the cache, so a page that
//! fails validation leaves the cache unchanged, and a shared cache is locked only
//! for the short assembly step.

use std::time::Instant;

use log::{debug, info, trace};

use crate::cache::{link_identity_key, Decision, HeaderCache, SharedHeaderCache};
use crate::classifier::find_dead_links;
use crate::fingerprint::ContainerFingerprint;
use crate::options::AuditOptions;
use crate::report::{AuditReport, HeaderStats, LinkRecord, ZoneTag};
use crate::selector::ZoneKind;
use crate::{dom, encoding, text, Error, Result};

/// A dead link ready for report assembly.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The record as it would appear in the report.
    pub record: LinkRecord,
    /// Fingerprint of the zone container; `None` for content-area links.
    pub fingerprint: Option<ContainerFingerprint>,
}

/// All dead links of one page, in document order.
#[derive(Debug, Clone, Default)]
pub struct PageScan {
    /// Number of anchors inspected.
    pub anchors_scanned: usize,
    /// Dead links, in document order.
    pub candidates: Vec<Candidate>,
}

/// Parse and scan a page without consulting any cache.
///
/// Fails with [`Error::InvalidDocument`] only for empty or whitespace-only input.
pub fn scan(html: &str, options: &AuditOptions) -> Result<PageScan> {
    // The parser recovers any non-empty input into a tree, so only empty input is rejected
    if html.trim().is_empty() {
        return Err(Error::InvalidDocument("empty document".to_string()));
    }

    let doc = dom::parse(html);

    let dead = find_dead_links(&doc, options);
    let candidates: Vec<Candidate> = dead
        .links
        .iter()
        .map(|link| {
            let zone_info = link.zone.as_ref().map(|zone| {
                let tag = ZoneTag {
                    kind: zone.kind,
                    selector_label: zone.selector_label(),
                    container: zone.describe_container(),
                };
                let fingerprint = ContainerFingerprint::with_markup_len(
                    &zone.container,
                    options.fingerprint_markup_len,
                );
                (tag, fingerprint)
            });
            let (zone, fingerprint) = zone_info.unzip();

            Candidate {
                record: LinkRecord {
                    text: text::format_label(&link.anchor),
                    href: link.href.clone(),
                    context: text::extract_context_with(
                        &link.anchor,
                        options.context_depth,
                        options.context_excerpt_len,
                    ),
                    zone,
                },
                fingerprint,
            }
        })
        .collect();

    debug!(
        "scanned {} anchors: {} dead ({} zoned)",
        dead.anchors_scanned,
        candidates.len(),
        candidates.iter().filter(|c| c.fingerprint.is_some()).count()
    );

    Ok(PageScan {
        anchors_scanned: dead.anchors_scanned,
        candidates,
    })
}

/// Build the report for a scanned page.
///
/// With a cache, each zoned link is checked against it in document order and links
/// already reported for a container of the same shape are dropped. Without one, every
/// link is reported and no stats are attached.
#[must_use]
pub fn assemble(scan: PageScan, mut cache: Option<&mut HeaderCache>, url: Option<String>) -> AuditReport {
    let mut hash_links = Vec::new();
    let mut header_hash_links = Vec::new();
    let mut footer_hash_links = Vec::new();
    let mut stats = HeaderStats::default();

    let evicted_before = cache.as_deref_mut().map_or(0, |cache| {
        cache.purge_expired(Instant::now());
        cache.evicted()
    });

    for Candidate { record, fingerprint } in scan.candidates {
        let Some(zone) = record.zone.as_ref() else {
            hash_links.push(record);
            continue;
        };
        let kind = zone.kind;

        if let (Some(cache), Some(fingerprint)) = (cache.as_deref_mut(), fingerprint.as_ref()) {
            let key = link_identity_key(&record.text, &record.href, &zone.selector_label);
            match cache.check(fingerprint, &key) {
                Decision::NewContainer => stats.new_headers_found += 1,
                Decision::NewLink => {}
                Decision::Duplicate => {
                    trace!("suppressing {key:?} already reported for {fingerprint}");
                    stats.skipped_links += 1;
                    continue;
                }
            }
        }

        match kind {
            ZoneKind::Header => header_hash_links.push(record),
            ZoneKind::Footer => footer_hash_links.push(record),
        }
    }

    if let Some(cache) = cache.as_deref() {
        let evicted = cache.evicted() - evicted_before;
        if evicted > 0 {
            info!(
                "evicted {evicted} least recently used containers from header cache (cap {:?})",
                cache.policy().max_containers
            );
        }
    }

    let header_stats = cache.map(|cache| HeaderStats {
        total_headers_processed: cache.len(),
        ..stats
    });

    AuditReport::new(url, hash_links, header_hash_links, footer_hash_links, header_stats)
}

/// Audit one page against an exclusively borrowed cache.
pub fn run(html: &str, cache: &mut HeaderCache, options: &AuditOptions) -> Result<AuditReport> {
    let page = scan(html, options)?;
    let cache = options.deduplicate.then_some(cache);
    Ok(assemble(page, cache, options.url.clone()))
}

/// Audit one page against a cache shared between threads.
///
/// Parsing and scanning run without the lock; the lock is held only while the
/// page's dedup decisions are applied.
pub fn run_shared(html: &str, cache: &SharedHeaderCache, options: &AuditOptions) -> Result<AuditReport> {
    let page = scan(html, options)?;
    if !options.deduplicate {
        return Ok(assemble(page, None, options.url.clone()));
    }
    let mut guard = cache.lock();
    Ok(assemble(page, Some(&mut *guard), options.url.clone()))
}

/// An audit session: options plus the cache that carries dedup state between pages.
///
/// # Example
///
/// ```rust
/// use deadlink_audit::{Auditor, AuditOptions};
///
/// let page = r##"<header><a href="#">Menu</a></header><p><a href="#">Jump</a></p>"##;
/// let mut auditor = Auditor::new(AuditOptions::default());
///
/// let first = auditor.audit(page)?;
/// assert_eq!(first.header_hash_links.len(), 1);
///
/// // Same header template on the next page: its link is already known
/// let second = auditor.audit(page)?;
/// assert!(second.header_hash_links.is_empty());
/// assert_eq!(second.hash_links.len(), 1);
/// # Ok::<(), deadlink_audit::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Auditor {
    options: AuditOptions,
    cache: HeaderCache,
}

impl Auditor {
    /// New session with an empty default cache.
    #[must_use]
    pub fn new(options: AuditOptions) -> Self {
        Self::with_cache(options, HeaderCache::new())
    }

    /// New session reusing an existing cache.
    #[must_use]
    pub fn with_cache(options: AuditOptions, cache: HeaderCache) -> Self {
        Self { options, cache }
    }

    /// Session options.
    #[must_use]
    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// Mutable session options, e.g. to set the URL of the next page.
    pub fn options_mut(&mut self) -> &mut AuditOptions {
        &mut self.options
    }

    /// The session cache.
    #[must_use]
    pub fn cache(&self) -> &HeaderCache {
        &self.cache
    }

    /// Forget every container seen so far.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Give up the session and keep its cache.
    #[must_use]
    pub fn into_cache(self) -> HeaderCache {
        self.cache
    }

    /// Audit one page.
    pub fn audit(&mut self, html: &str) -> Result<AuditReport> {
        run(html, &mut self.cache, &self.options)
    }

    /// Audit one fetched body, decoding it according to its Content-Type first.
    pub fn audit_bytes(&mut self, body: &[u8], content_type: Option<&str>) -> Result<AuditReport> {
        let html = encoding::decode_body(body, content_type)?;
        self.audit(&html)
    }
}
