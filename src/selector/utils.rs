//! Utility functions for selector pattern matching
//!
//! Attribute accessors returning empty strings instead of `Option`, plus the
//! case-insensitive token checks the zone catalogue is built from.

use crate::dom;
use dom_query::Selection;

// === Element Attribute Helpers ===

/// Get element class attribute (empty string if missing)
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Get tag name (empty string if missing)
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Whitespace-separated class tokens, in attribute order.
///
/// # Example
///
/// ```rust
/// use deadlink_audit::selector::utils;
/// use deadlink_audit::dom;
///
/// let doc = dom::parse(r#"<div class=" navbar  sticky ">x</div>"#);
/// assert_eq!(utils::class_tokens(&doc.select("div")), vec!["navbar", "sticky"]);
/// ```
#[must_use]
pub fn class_tokens(sel: &Selection) -> Vec<String> {
    class(sel).split_whitespace().map(str::to_string).collect()
}

/// Case-insensitive check for one class token
#[must_use]
pub fn has_class_token(sel: &Selection, token: &str) -> bool {
    class(sel)
        .split_whitespace()
        .any(|t| t.eq_ignore_ascii_case(token))
}

/// Check if element has a specific tag
///
/// Case-insensitive comparison.
#[inline]
#[must_use]
pub fn is_tag(sel: &Selection, expected: &str) -> bool {
    dom::tag_name(sel).is_some_and(|t| t.eq_ignore_ascii_case(expected))
}

/// Case-insensitive check for an attribute value, trimmed
#[must_use]
pub fn attr_equals(sel: &Selection, name: &str, expected: &str) -> bool {
    dom::get_attribute(sel, name).is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_are_empty() {
        let doc = dom::parse("<div>text</div>");
        let div = doc.select("div");

        assert_eq!(class(&div), "");
        assert_eq!(tag(&div), "div");
        assert_eq!(tag(&doc.select("span")), "");
    }

    #[test]
    fn test_class_token_match_is_exact_and_case_insensitive() {
        let doc = dom::parse(r#"<div class="Site-Footer footer-extra">x</div>"#);
        let div = doc.select("div");

        assert!(has_class_token(&div, "site-footer"));
        assert!(has_class_token(&div, "footer-extra"));
        assert!(!has_class_token(&div, "footer"));
    }

    #[test]
    fn test_is_tag() {
        let doc = dom::parse("<nav>links</nav>");
        assert!(is_tag(&doc.select("nav"), "NAV"));
        assert!(!is_tag(&doc.select("nav"), "header"));
    }

    #[test]
    fn test_attr_equals_trims_and_ignores_case() {
        let doc = dom::parse(r#"<div role=" ContentInfo ">x</div>"#);
        assert!(attr_equals(&doc.select("div"), "role", "contentinfo"));
        assert!(!attr_equals(&doc.select("div"), "aria-label", "contentinfo"));
    }
}
