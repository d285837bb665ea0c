//! Tag canonicalization.
//!
//! Tags are authored by hand in frontmatter, so `"Street"`, `"street "` and
//! `"STREET"` all show up. Every comparison in the engine goes through
//! [`normalize`]; two tags that normalize equal are the same facet value.

use std::collections::BTreeSet;

/// Trim and lowercase. Missing input normalizes to the empty string.
pub fn normalize(tag: Option<&str>) -> String {
    tag.unwrap_or_default().trim().to_lowercase()
}

/// Normalized, non-empty tags of one item.
///
/// Blank keywords are dropped so they never become selectable facets.
pub fn tag_set<S: AsRef<str>>(tags: &[S]) -> BTreeSet<String> {
    tags.iter()
        .map(|t| normalize(Some(t.as_ref())))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whether `tags` contains `tag` after normalizing both sides.
pub fn has_tag<S: AsRef<str>>(tags: &[S], tag: &str) -> bool {
    let wanted = normalize(Some(tag));
    !wanted.is_empty() && tags.iter().any(|t| normalize(Some(t.as_ref())) == wanted)
}
