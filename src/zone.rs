//! Zone Locator
//!
//! Resolves the nearest enclosing header/navigation or footer zone of an element.
//! The catalogue is materialized once per document into per-rule node-id sets, so each
//! lookup is an O(depth × rules) walk with O(1) membership tests.

use std::collections::HashSet;

use dom_query::{Document, NodeId, Selection};

use crate::dom;
use crate::selector::{self, ZoneKind, ZoneRule, ZONE_CATALOGUE};

/// The nearest zone container enclosing an element.
#[derive(Clone)]
pub struct ZoneMembership<'a> {
    /// Zone kind of the matched rule.
    pub kind: ZoneKind,
    /// The element that matched (the element itself or one of its ancestors).
    pub container: Selection<'a>,
    /// The catalogue rule that matched first.
    pub rule: &'static ZoneRule,
}

impl ZoneMembership<'_> {
    /// CSS-style label of the matched rule (`nav`, `.navbar`, `#footer`, ...).
    #[must_use]
    pub fn selector_label(&self) -> String {
        self.rule.matcher.label()
    }

    /// Human-readable description of the container: tag, then id and class if present.
    ///
    /// ```rust
    /// use deadlink_audit::{dom, zone::ZoneLocator};
    ///
    /// let doc = dom::parse(r##"<nav id="top" class="navbar dark"><a href="#">x</a></nav>"##);
    /// let locator = ZoneLocator::new(&doc);
    /// let zone = locator.locate(&doc.select("a")).unwrap();
    /// assert_eq!(zone.describe_container(), "nav (id=top) (class=navbar dark)");
    /// ```
    #[must_use]
    pub fn describe_container(&self) -> String {
        let mut out = dom::tag_name(&self.container).unwrap_or_default();
        if let Some(id) = dom::id(&self.container).filter(|v| !v.is_empty()) {
            out.push_str(&format!(" (id={id})"));
        }
        if let Some(class) = dom::class_name(&self.container).filter(|v| !v.trim().is_empty()) {
            out.push_str(&format!(" (class={})", class.trim()));
        }
        out
    }
}

/// Per-document materialization of the zone catalogue.
pub struct ZoneLocator {
    catalogue: &'static [ZoneRule],
    /// Node ids matching each rule, index-aligned with `catalogue`.
    matched: Vec<HashSet<NodeId>>,
}

impl ZoneLocator {
    /// Materialize the default catalogue against a document.
    #[must_use]
    pub fn new(doc: &Document) -> Self {
        Self::with_catalogue(doc, ZONE_CATALOGUE)
    }

    /// Materialize a custom catalogue against a document.
    #[must_use]
    pub fn with_catalogue(doc: &Document, catalogue: &'static [ZoneRule]) -> Self {
        let root = doc.select("html");
        let matched = catalogue
            .iter()
            .map(|rule| {
                selector::query_all(&root, |sel| rule.matcher.matches(sel))
                    .iter()
                    .filter_map(dom::node_id)
                    .collect()
            })
            .collect();

        Self { catalogue, matched }
    }

    /// Nearest enclosing zone of `element`, checking the element itself first.
    ///
    /// Walks up through ancestors and stops before `<body>`; at each level the rules are
    /// tried in catalogue order, so the nearest container wins and ties on one element
    /// go to the earlier rule.
    #[must_use]
    pub fn locate<'a>(&self, element: &Selection<'a>) -> Option<ZoneMembership<'a>> {
        let catalogue: &'static [ZoneRule] = self.catalogue;
        let mut current = element.clone();

        while current.exists() && !dom::is_page_root(&current) {
            if let Some(node_id) = dom::node_id(&current) {
                let hit = catalogue
                    .iter()
                    .zip(&self.matched)
                    .find(|(_, ids)| ids.contains(&node_id));

                if let Some((rule, _)) = hit {
                    return Some(ZoneMembership {
                        kind: rule.kind,
                        container: current,
                        rule,
                    });
                }
            }
            current = dom::parent(&current);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate_kind(html: &str, target: &str) -> Option<(ZoneKind, String)> {
        let doc = dom::parse(html);
        let locator = ZoneLocator::new(&doc);
        locator
            .locate(&doc.select(target))
            .map(|zone| (zone.kind, zone.selector_label()))
    }

    #[test]
    fn test_tag_based_zones() {
        assert_eq!(
            locate_kind("<header><a id=t>x</a></header>", "#t"),
            Some((ZoneKind::Header, "header".to_string()))
        );
        assert_eq!(
            locate_kind("<footer><p><a id=t>x</a></p></footer>", "#t"),
            Some((ZoneKind::Footer, "footer".to_string()))
        );
    }

    #[test]
    fn test_unzoned_element() {
        assert_eq!(locate_kind("<main><p><a id=t>x</a></p></main>", "#t"), None);
    }

    #[test]
    fn test_first_catalogue_hit_on_one_element() {
        assert_eq!(
            locate_kind(r#"<nav class="navbar" id="navbar"><a id=t>x</a></nav>"#, "#t"),
            Some((ZoneKind::Header, "nav".to_string()))
        );
        assert_eq!(
            locate_kind(r#"<div class="footer navbar"><a id=t>x</a></div>"#, "#t"),
            Some((ZoneKind::Header, ".navbar".to_string()))
        );
    }

    #[test]
    fn test_nearest_zone_wins() {
        assert_eq!(
            locate_kind("<nav><footer><a id=t>x</a></footer></nav>", "#t"),
            Some((ZoneKind::Footer, "footer".to_string()))
        );
        assert_eq!(
            locate_kind("<footer><nav><a id=t>x</a></nav></footer>", "#t"),
            Some((ZoneKind::Header, "nav".to_string()))
        );
    }

    #[test]
    fn test_element_itself_can_be_container() {
        assert_eq!(
            locate_kind(r#"<div><a id="t" class="navbar">x</a></div>"#, "#t"),
            Some((ZoneKind::Header, ".navbar".to_string()))
        );
    }

    #[test]
    fn test_body_and_html_are_never_zones() {
        let html = r#"<html class="header"><body class="footer"><a id="t">x</a></body></html>"#;
        assert_eq!(locate_kind(html, "#t"), None);
    }

    #[test]
    fn test_role_contentinfo() {
        assert_eq!(
            locate_kind(r#"<div role="contentinfo"><span><a id=t>x</a></span></div>"#, "#t"),
            Some((ZoneKind::Footer, "[role=\"contentinfo\"]".to_string()))
        );
    }

    #[test]
    fn test_container_is_the_matching_ancestor() {
        let doc = dom::parse(r#"<div id="site-footer"><ul><li><a id="t">x</a></li></ul></div>"#);
        let locator = ZoneLocator::new(&doc);
        let zone = locator.locate(&doc.select("#t")).unwrap();

        assert!(dom::is_same_node(&zone.container, &doc.select("#site-footer")));
        assert_eq!(zone.describe_container(), "div (id=site-footer)");
    }
}
