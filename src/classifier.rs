//! Link Classifier
//!
//! Walks every anchor of a document in order, applies the dead-link predicate of the
//! audit options ([`AuditOptions::is_dead_href`]) and assigns each dead anchor to its zone.

use dom_query::{Document, Selection};

use crate::dom;
use crate::options::AuditOptions;
use crate::zone::{ZoneLocator, ZoneMembership};

/// One dead anchor and the zone it was assigned to.
#[derive(Clone)]
pub struct DeadLink<'a> {
    /// The anchor element.
    pub anchor: Selection<'a>,
    /// The `href` as written in the page.
    pub href: String,
    /// Nearest enclosing zone, `None` for content-area links.
    pub zone: Option<ZoneMembership<'a>>,
}

/// Dead anchors of one document, split into zoned and unzoned buckets.
#[derive(Default)]
pub struct DeadLinkScan<'a> {
    /// Number of anchors inspected.
    pub anchors_scanned: usize,
    /// Every dead anchor in document order.
    pub links: Vec<DeadLink<'a>>,
}

impl<'a> DeadLinkScan<'a> {
    /// Dead anchors inside a header or footer zone, in document order.
    pub fn zoned(&self) -> impl Iterator<Item = &DeadLink<'a>> {
        self.links.iter().filter(|l| l.zone.is_some())
    }

    /// Dead anchors outside every zone, in document order.
    pub fn unzoned(&self) -> impl Iterator<Item = &DeadLink<'a>> {
        self.links.iter().filter(|l| l.zone.is_none())
    }
}

/// Find every dead anchor of `doc`, each exactly once, in document order.
#[must_use]
pub fn find_dead_links<'a>(doc: &'a Document, options: &AuditOptions) -> DeadLinkScan<'a> {
    let locator = ZoneLocator::new(doc);
    let anchors = dom::each(&dom::get_elements_by_tag_name(&doc.select("html"), "a"));

    let links = anchors
        .iter()
        .filter_map(|anchor| {
            let href = dom::get_attribute(anchor, "href")?;
            if !options.is_dead_href(&href) {
                return None;
            }
            Some(DeadLink {
                zone: locator.locate(anchor),
                anchor: anchor.clone(),
                href,
            })
        })
        .collect();

    DeadLinkScan {
        anchors_scanned: anchors.len(),
        links,
    }
}
