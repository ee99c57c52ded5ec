//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` crate exposing the query contract the auditor
//! consumes: attribute lookup, tag names, text content, parent/child navigation,
//! selector queries and stable node identity.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
///
/// Returns `None` for an empty selection and for the document node.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .filter(|node| node.is_element())
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Identity of the first node in the selection.
///
/// Node ids are stable for the lifetime of the owning `Document`, so they can be
/// collected into sets and compared across separate queries.
#[inline]
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|node| node.id)
}

/// Whether two selections start at the same node.
#[must_use]
pub fn is_same_node(a: &Selection, b: &Selection) -> bool {
    matches!((node_id(a), node_id(b)), (Some(x), Some(y)) if x == y)
}

/// True for the page-wide containers (`html`, `body`) that never count as zones.
#[must_use]
pub fn is_page_root(sel: &Selection) -> bool {
    matches!(tag_name(sel).as_deref(), Some("html" | "body"))
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

// === Tree Navigation ===

/// Get parent node
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Get direct element children
#[inline]
#[must_use]
pub fn children<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.children()
}

/// One immediate child of an element: a text run or an element.
#[derive(Clone)]
pub enum ChildNode<'a> {
    /// A text node, untrimmed.
    Text(StrTendril),
    /// An element child.
    Element(Selection<'a>),
}

/// Immediate child nodes of the first node in the selection, in document order.
///
/// Comments and other node kinds are skipped.
#[must_use]
pub fn child_nodes<'a>(sel: &Selection<'a>) -> Vec<ChildNode<'a>> {
    let Some(node) = sel.nodes().first() else {
        return Vec::new();
    };

    node.children()
        .into_iter()
        .filter_map(|child| {
            if child.is_text() {
                Some(ChildNode::Text(child.text()))
            } else if child.is_element() {
                Some(ChildNode::Element(Selection::from(child)))
            } else {
                None
            }
        })
        .collect()
}

// === Querying ===

/// Query all elements by CSS selector
#[inline]
#[must_use]
pub fn query_selector_all<'a>(sel: &Selection<'a>, selector: &str) -> Selection<'a> {
    sel.select(selector)
}

/// Get elements by tag name
#[inline]
#[must_use]
pub fn get_elements_by_tag_name<'a>(sel: &Selection<'a>, tag: &str) -> Selection<'a> {
    sel.select(tag)
}

/// Split a selection into one single-node selection per matched node, in document order.
#[must_use]
pub fn each<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().iter().map(|node| Selection::from(*node)).collect()
}
