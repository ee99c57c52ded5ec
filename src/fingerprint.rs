//! Container fingerprints.
//!
//! A fingerprint is a deliberately lossy structural identity for a zone container:
//! tag name, sorted class list, and a hash of the first characters of its
//! whitespace-normalized inner markup. The same header template rendered on two pages
//! produces the same fingerprint, so its dead links are reported once per session.
//! Containers that differ only after the truncation point collide; that is accepted.

use std::fmt;

use dom_query::Selection;

use crate::dom;
use crate::patterns::WHITESPACE_RUN;
use crate::selector::utils;

/// Characters of normalized inner markup that take part in the hash.
pub const DEFAULT_MARKUP_LEN: usize = 200;

/// Structural identity key of a zone container, `<tag>-<sorted classes>-<hash>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerFingerprint(String);

impl ContainerFingerprint {
    /// Fingerprint of `container` using the default markup length.
    #[must_use]
    pub fn of(container: &Selection) -> Self {
        Self::with_markup_len(container, DEFAULT_MARKUP_LEN)
    }

    /// Fingerprint of `container`, hashing the first `markup_len` characters of its
    /// normalized inner markup.
    #[must_use]
    pub fn with_markup_len(container: &Selection, markup_len: usize) -> Self {
        let tag = utils::tag(container);

        let mut classes = utils::class_tokens(container);
        classes.sort();
        let classes = classes.join(" ");

        let markup = dom::inner_html(container);
        let normalized = WHITESPACE_RUN.replace_all(markup.trim(), " ");
        let bounded: String = normalized.chars().take(markup_len).collect();

        Self(format!("{tag}-{classes}-{}", string_hash(&bounded)))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 32-bit multiplicative string hash (`h = h * 31 + unit` over UTF-16 code units,
/// wrapping), rendered as the base-36 absolute value.
#[must_use]
pub fn string_hash(s: &str) -> String {
    let hash = s
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit)));

    to_base36(i64::from(hash).unsigned_abs())
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
