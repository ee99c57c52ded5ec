//! Text & Context Extraction
//!
//! Builds the readable label of an anchor from its mixed text/element content, and a
//! short description of where the anchor sits on the page.

use dom_query::Selection;

use crate::dom::{self, ChildNode};
use crate::patterns::WHITESPACE_RUN;

/// Label used when an anchor has no text at all.
pub const NO_TEXT_PLACEHOLDER: &str = "[No text]";

/// Context used when neither an identifiable ancestor nor surrounding text exists.
pub const NO_CONTEXT: &str = "No context available";

/// Ancestor levels inspected for an id or class.
pub const DEFAULT_CONTEXT_DEPTH: usize = 3;

/// Maximum characters of surrounding text quoted in a context string.
pub const DEFAULT_EXCERPT_LEN: usize = 100;

/// Readable label for an anchor.
///
/// A plain-text anchor yields its trimmed text. An anchor wrapping elements (icon plus
/// label spans, for example) yields one segment per non-empty immediate text run or
/// child element, in document order, joined with `" | "`.
///
/// # Example
///
/// ```rust
/// use deadlink_audit::{dom, text};
///
/// let doc = dom::parse(r##"<a href="#"><i class="icon">☰</i><span>Menu</span></a>"##);
/// assert_eq!(text::format_label(&doc.select("a")), "☰ | Menu");
/// ```
#[must_use]
pub fn format_label(anchor: &Selection) -> String {
    let whole = dom::text_content(anchor).trim().to_string();

    if dom::children(anchor).is_empty() {
        return non_empty_or_placeholder(whole);
    }

    let segments: Vec<String> = dom::child_nodes(anchor)
        .iter()
        .map(|child| match child {
            ChildNode::Text(text) => collapse_whitespace(text),
            ChildNode::Element(element) => collapse_whitespace(&dom::text_content(element)),
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        non_empty_or_placeholder(whole)
    } else {
        segments.join(" | ")
    }
}

/// Context description using the default depth and excerpt length.
#[must_use]
pub fn extract_context(anchor: &Selection) -> String {
    extract_context_with(anchor, DEFAULT_CONTEXT_DEPTH, DEFAULT_EXCERPT_LEN)
}

/// Context description for an anchor.
///
/// Walks up to `depth` ancestors starting at the parent and reports the first one that
/// carries an id (preferred) or a class. Otherwise quotes the parent's text, truncated
/// to `excerpt_len` characters.
#[must_use]
pub fn extract_context_with(anchor: &Selection, depth: usize, excerpt_len: usize) -> String {
    let parent = dom::parent(anchor);

    let mut current = parent.clone();
    for _ in 0..depth {
        if !current.exists() {
            break;
        }
        if let Some(id) = dom::id(&current).filter(|v| !v.trim().is_empty()) {
            return format!("Inside element with id=\"{}\"", id.trim());
        }
        if let Some(class) = dom::class_name(&current).filter(|v| !v.trim().is_empty()) {
            return format!("Inside element with class=\"{}\"", class.trim());
        }
        current = dom::parent(&current);
    }

    let parent_text = dom::text_content(&parent);
    let parent_text = parent_text.trim();
    if parent_text.is_empty() {
        return NO_CONTEXT.to_string();
    }

    let (excerpt, truncated) = truncate_chars(parent_text, excerpt_len);
    let ellipsis = if truncated { "..." } else { "" };
    format!("Near text: \"{excerpt}{ellipsis}\"")
}

/// First `max` characters of `s`, and whether anything was cut.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> (&str, bool) {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => (&s[..byte_idx], true),
        None => (s, false),
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

fn non_empty_or_placeholder(text: String) -> String {
    if text.is_empty() {
        NO_TEXT_PLACEHOLDER.to_string()
    } else {
        text
    }
}
