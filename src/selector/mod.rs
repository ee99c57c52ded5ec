//! Zone Catalogue
//!
//! Declarative table of the selector rules that mark a page region as a header/navigation
//! zone or a footer zone. The table is static and read-only; the zone locator materializes
//! it once per document and runs a single nearest-enclosing-match walk over it.

use dom_query::Selection;
use serde::{Deserialize, Serialize};

use crate::dom;

pub mod utils;

/// Structural zone a dead link can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Site header or navigation.
    Header,
    /// Site footer.
    Footer,
}

impl ZoneKind {
    /// Lowercase name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule recognises its container. All comparisons ignore ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Element tag name.
    Tag(&'static str),
    /// One token of the `class` attribute.
    Class(&'static str),
    /// The `id` attribute.
    Id(&'static str),
    /// The ARIA `role` attribute.
    Role(&'static str),
}

impl Matcher {
    /// Test a single element.
    #[must_use]
    pub fn matches(&self, sel: &Selection) -> bool {
        match *self {
            Self::Tag(tag) => utils::is_tag(sel, tag),
            Self::Class(token) => utils::has_class_token(sel, token),
            Self::Id(id) => dom::id(sel).is_some_and(|v| v.eq_ignore_ascii_case(id)),
            Self::Role(role) => utils::attr_equals(sel, "role", role),
        }
    }

    /// CSS-style label for the rule, e.g. `nav`, `.navbar`, `#footer`.
    #[must_use]
    pub fn label(&self) -> String {
        match *self {
            Self::Tag(tag) => tag.to_string(),
            Self::Class(token) => format!(".{token}"),
            Self::Id(id) => format!("#{id}"),
            Self::Role(role) => format!("[role=\"{role}\"]"),
        }
    }
}

/// One catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRule {
    pub kind: ZoneKind,
    pub matcher: Matcher,
}

const fn rule(kind: ZoneKind, matcher: Matcher) -> ZoneRule {
    ZoneRule { kind, matcher }
}

/// The zone catalogue. Header rules precede footer rules; when one element matches several
/// rules, the earliest entry wins.
pub static ZONE_CATALOGUE: &[ZoneRule] = &[
    rule(ZoneKind::Header, Matcher::Tag("header")),
    rule(ZoneKind::Header, Matcher::Tag("nav")),
    rule(ZoneKind::Header, Matcher::Class("header")),
    rule(ZoneKind::Header, Matcher::Id("header")),
    rule(ZoneKind::Header, Matcher::Class("navigation")),
    rule(ZoneKind::Header, Matcher::Id("navigation")),
    rule(ZoneKind::Header, Matcher::Class("main-nav")),
    rule(ZoneKind::Header, Matcher::Id("main-nav")),
    rule(ZoneKind::Header, Matcher::Class("navbar")),
    rule(ZoneKind::Header, Matcher::Id("navbar")),
    rule(ZoneKind::Footer, Matcher::Tag("footer")),
    rule(ZoneKind::Footer, Matcher::Class("footer")),
    rule(ZoneKind::Footer, Matcher::Id("footer")),
    rule(ZoneKind::Footer, Matcher::Class("footer-bottom")),
    rule(ZoneKind::Footer, Matcher::Class("footer__menu")),
    rule(ZoneKind::Footer, Matcher::Class("footer__links")),
    rule(ZoneKind::Footer, Matcher::Class("site-footer")),
    rule(ZoneKind::Footer, Matcher::Id("site-footer")),
    rule(ZoneKind::Footer, Matcher::Class("bottom-footer")),
    rule(ZoneKind::Footer, Matcher::Class("page-footer")),
    rule(ZoneKind::Footer, Matcher::Class("copyright-footer")),
    rule(ZoneKind::Footer, Matcher::Role("contentinfo")),
];

/// Query for all elements matching the predicate
///
/// Iterates through all descendants in document order and collects all
/// elements for which the predicate returns true.
///
/// # Example
///
/// ```rust
/// use deadlink_audit::selector::{self, Matcher};
/// use deadlink_audit::dom;
///
/// let doc = dom::parse(r#"<div><p class="item">1</p><p class="ITEM">2</p></div>"#);
/// let root = doc.select("div");
///
/// let results = selector::query_all(&root, |sel| Matcher::Class("item").matches(sel));
/// assert_eq!(results.len(), 2);
/// ```
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: impl Fn(&Selection) -> bool) -> Vec<Selection<'a>> {
    dom::each(&dom::query_selector_all(root, "*"))
        .into_iter()
        .filter(|sel| rule(sel))
        .collect()
}
