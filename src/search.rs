//! Full-text search over photography and writing.
//!
//! ## Pipeline
//!
//! ```text
//! query → tokens → haystack per item → all tokens present? → score → rank
//! ```
//!
//! - **Tokens**: the query lowercased and split on whitespace. A query with
//!   no tokens returns nothing rather than everything.
//! - **Haystack**: the item's display fields joined, lowercased, whitespace
//!   collapsed. Markdown bodies are flattened to plain text first so markup
//!   never matches.
//! - **Match**: every token must occur as a substring. Adding a word narrows
//!   the result.
//! - **Relevance**: the sum of each token's occurrence count.
//!
//! ## Ranking
//!
//! | Domain | Keys |
//! |--------|------|
//! | photos | order_score desc → relevance desc → date desc → id |
//! | albums | order_score desc → relevance desc → date desc → slug |
//! | entries | date desc → slug |
//!
//! The photography view lists album hits ahead of photo hits regardless of
//! relevance.

use crate::corpus::Corpus;
use crate::sort::{self, SortDirection};
use crate::types::{Album, Entry, Photo};
use pulldown_cmark::{Event, Parser, TagEnd};
use std::collections::HashMap;

/// One matching item and its relevance.
#[derive(Debug, PartialEq)]
pub struct SearchHit<'a, T> {
    pub item: &'a T,
    pub relevance: usize,
}

// Derived impls would require `T: Copy`
impl<T> Clone for SearchHit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SearchHit<'_, T> {}

/// Lowercased, non-empty whitespace-separated tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Sum of token occurrences, or `None` if any token is absent.
pub fn relevance(haystack: &str, tokens: &[String]) -> Option<usize> {
    tokens.iter().try_fold(0, |total, token| {
        match haystack.matches(token.as_str()).count() {
            0 => None,
            n => Some(total + n),
        }
    })
}

// ============================================================================
// Haystacks
// ============================================================================

fn haystack<'s, I: IntoIterator<Item = &'s str>>(parts: I) -> String {
    let joined = parts.into_iter().collect::<Vec<_>>().join(" ");
    joined
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Searchable text of a photo. `album_title` is omitted when the album does
/// not resolve.
pub fn photo_haystack(photo: &Photo, album_title: Option<&str>) -> String {
    let mut parts = vec![photo.title.as_str()];
    parts.extend(photo.story.as_deref());
    parts.extend(photo.tags.iter().map(String::as_str));
    parts.extend(photo.camera.as_deref());
    parts.extend(photo.settings_raw.as_deref());
    parts.extend(photo.location.as_deref());
    parts.extend(album_title);
    haystack(parts)
}

pub fn album_haystack(album: &Album) -> String {
    let mut parts = vec![album.title.as_str()];
    parts.extend(album.description.as_deref());
    haystack(parts)
}

pub fn entry_haystack(entry: &Entry) -> String {
    let body = markdown_text(&entry.body);
    let mut parts = vec![entry.title.as_str()];
    parts.extend(entry.description.as_deref());
    parts.push(&body);
    parts.extend(entry.tags.iter().map(String::as_str));
    haystack(parts)
}

/// Visible text of a markdown document, blocks separated by spaces.
fn markdown_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                text.push(' ')
            }
            _ => {}
        }
    }
    text
}

// ============================================================================
// Per-domain search
// ============================================================================

/// Matching photos, ranked.
pub fn search_photos<'a>(
    query: &str,
    photos: &'a [Photo],
    albums: &[Album],
) -> Vec<SearchHit<'a, Photo>> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }
    let titles: HashMap<&str, &str> = albums
        .iter()
        .map(|a| (a.slug.as_str(), a.title.as_str()))
        .collect();

    let mut hits: Vec<_> = photos
        .iter()
        .filter_map(|photo| {
            let title = titles.get(photo.album.as_str()).copied();
            relevance(&photo_haystack(photo, title), &tokens)
                .map(|relevance| SearchHit { item: photo, relevance })
        })
        .collect();

    hits.sort_by(|a, b| {
        sort::by_score_desc(a.item.order_score, b.item.order_score)
            .then_with(|| b.relevance.cmp(&a.relevance))
            .then_with(|| SortDirection::Descending.apply(a.item.date.cmp(&b.item.date)))
            .then_with(|| sort::compare_ids(a.item, b.item))
    });
    hits
}

/// Matching albums, ranked.
pub fn search_albums<'a>(query: &str, albums: &'a [Album]) -> Vec<SearchHit<'a, Album>> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<_> = albums
        .iter()
        .filter_map(|album| {
            relevance(&album_haystack(album), &tokens)
                .map(|relevance| SearchHit { item: album, relevance })
        })
        .collect();

    hits.sort_by(|a, b| {
        sort::by_score_desc(a.item.order_score, b.item.order_score)
            .then_with(|| b.relevance.cmp(&a.relevance))
            .then_with(|| b.item.date.cmp(&a.item.date))
            .then_with(|| a.item.slug.cmp(&b.item.slug))
    });
    hits
}

/// Matching posts and projects, newest first.
pub fn search_entries<'a>(query: &str, entries: &'a [Entry]) -> Vec<SearchHit<'a, Entry>> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<_> = entries
        .iter()
        .filter_map(|entry| {
            relevance(&entry_haystack(entry), &tokens)
                .map(|relevance| SearchHit { item: entry, relevance })
        })
        .collect();
    hits.sort_by(|a, b| sort::compare_entries(a.item, b.item));
    hits
}

// ============================================================================
// Combined views
// ============================================================================

/// Result of the photography search page.
#[derive(Debug, Clone, Default)]
pub struct PhotographyResults<'a> {
    pub albums: Vec<SearchHit<'a, Album>>,
    pub photos: Vec<SearchHit<'a, Photo>>,
}

/// One row of the photography search page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhotographyHit<'a> {
    Album(SearchHit<'a, Album>),
    Photo(SearchHit<'a, Photo>),
}

impl<'a> PhotographyResults<'a> {
    pub fn len(&self) -> usize {
        self.albums.len() + self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty() && self.photos.is_empty()
    }

    /// Albums first, then photos.
    pub fn hits(&self) -> impl Iterator<Item = PhotographyHit<'a>> + '_ {
        self.albums
            .iter()
            .copied()
            .map(PhotographyHit::Album)
            .chain(self.photos.iter().copied().map(PhotographyHit::Photo))
    }
}

pub fn search_photography<'a>(query: &str, corpus: &'a Corpus) -> PhotographyResults<'a> {
    PhotographyResults {
        albums: search_albums(query, &corpus.albums),
        photos: search_photos(query, &corpus.photos, &corpus.albums),
    }
}

pub fn search_writing<'a>(query: &str, corpus: &'a Corpus) -> Vec<SearchHit<'a, Entry>> {
    search_entries(query, &corpus.entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn hit_slugs(hits: &[SearchHit<'_, Photo>]) -> Vec<String> {
        hits.iter().map(|h| h.item.slug.clone()).collect()
    }

    // =========================================================================
    // Tokens and relevance
    // =========================================================================

    #[test]
    fn tokenize_lowercases_and_drops_blanks() {
        assert_eq!(tokenize("  Street   TOKYO "), vec!["street", "tokyo"]);
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn relevance_sums_occurrences() {
        let tokens = tokenize("street");
        assert_eq!(relevance("street art, street food", &tokens), Some(2));
    }

    #[test]
    fn relevance_requires_every_token() {
        let h = "street photography, tokyo 2024";
        assert_eq!(relevance(h, &tokenize("street tokyo")), Some(2));
        assert_eq!(relevance(h, &tokenize("street paris")), None);
    }

    #[test]
    fn relevance_matches_substrings() {
        assert_eq!(relevance("photography", &tokenize("photo")), Some(1));
    }

    // =========================================================================
    // Haystacks
    // =========================================================================

    #[test]
    fn photo_haystack_collapses_and_lowercases() {
        let p = photo("tokyo", "x")
            .title("Street  photography")
            .story("Tokyo\n\n2024")
            .build();
        assert_eq!(photo_haystack(&p, None), "street photography tokyo 2024");
    }

    #[test]
    fn photo_haystack_includes_every_field() {
        let p = photo("tokyo", "x")
            .title("Neon")
            .tags(&["Night"])
            .camera("Leica Q2")
            .settings("f/1.7")
            .location("Shinjuku")
            .build();
        assert_eq!(
            photo_haystack(&p, Some("Tokyo Nights")),
            "neon night leica q2 f/1.7 shinjuku tokyo nights"
        );
    }

    #[test]
    fn entry_haystack_strips_markdown() {
        let e = entry("rust")
            .title("Rust notes")
            .body("# Heading\n\nSome **bold** and `code`.\n\n[link](https://example.com)")
            .tags(&["Tooling"])
            .build();
        let h = entry_haystack(&e);
        assert!(h.ends_with("tooling"));
        assert!(h.contains("heading some bold and code."));
        assert!(!h.contains("**"));
        assert!(!h.contains("example.com"));
    }

    // =========================================================================
    // Photo search
    // =========================================================================

    #[test]
    fn empty_query_returns_nothing() {
        let photos = vec![photo("a", "x").build()];
        assert!(search_photos("", &photos, &[]).is_empty());
        assert!(search_photos("   ", &photos, &[]).is_empty());
    }

    #[test]
    fn multi_token_query_narrows() {
        let photos = vec![
            photo("a", "both").title("Street photography, Tokyo 2024").build(),
            photo("a", "street-only").title("Street in Paris").build(),
        ];
        assert_eq!(hit_slugs(&search_photos("street", &photos, &[])).len(), 2);
        assert_eq!(
            hit_slugs(&search_photos("street tokyo", &photos, &[])),
            vec!["both"]
        );
        assert!(search_photos("street berlin", &photos, &[]).is_empty());
    }

    #[test]
    fn album_title_is_searchable() {
        let photos = vec![photo("kyoto-2023", "gate").title("Gate").build()];
        let albums = vec![album("kyoto-2023").title("Autumn in Kyoto").build()];
        assert_eq!(search_photos("autumn", &photos, &albums).len(), 1);
    }

    #[test]
    fn dangling_album_still_searchable_by_own_fields() {
        let photos = vec![photo("missing", "gate").title("Red gate").build()];
        let hits = search_photos("gate", &photos, &[]);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn order_score_outranks_relevance() {
        let photos = vec![
            photo("a", "relevant").title("rain rain rain").build(),
            photo("a", "pinned").title("rain").score(1.0).build(),
        ];
        let hits = search_photos("rain", &photos, &[]);
        assert_eq!(hit_slugs(&hits), vec!["pinned", "relevant"]);
        assert_eq!(hits[1].relevance, 3);
    }

    #[test]
    fn relevance_then_date_break_score_ties() {
        let photos = vec![
            photo("a", "old-once").title("rain").date("2020-01-01").build(),
            photo("a", "new-once").title("rain").date("2024-01-01").build(),
            photo("a", "twice").title("rain on rain").date("2019-01-01").build(),
        ];
        let hits = search_photos("rain", &photos, &[]);
        assert_eq!(hit_slugs(&hits), vec!["twice", "new-once", "old-once"]);
    }

    // =========================================================================
    // Albums, entries, combined
    // =========================================================================

    #[test]
    fn albums_ranked_by_score_then_relevance() {
        let albums = vec![
            album("a").title("Tokyo").description("tokyo tokyo").build(),
            album("b").title("Tokyo").score(2.0).build(),
        ];
        let hits = search_albums("tokyo", &albums);
        let order: Vec<&str> = hits.iter().map(|h| h.item.slug.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn entries_ranked_newest_first_ignoring_relevance() {
        let entries = vec![
            entry("old").title("Rust rust rust").date("2020-01-01").build(),
            entry("new").title("Rust").date("2024-01-01").build(),
        ];
        let hits = search_entries("rust", &entries);
        let order: Vec<&str> = hits.iter().map(|h| h.item.slug.as_str()).collect();
        assert_eq!(order, vec!["new", "old"]);
    }

    #[test]
    fn photography_lists_albums_before_photos() {
        let corpus = Corpus {
            photos: vec![photo("misc", "p").title("Tokyo tokyo tokyo").score(9.0).build()],
            albums: vec![album("tokyo").title("Tokyo").build()],
            entries: vec![],
        };
        let results = search_photography("tokyo", &corpus);
        assert_eq!(results.len(), 2);
        let kinds: Vec<&str> = results
            .hits()
            .map(|h| match h {
                PhotographyHit::Album(_) => "album",
                PhotographyHit::Photo(_) => "photo",
            })
            .collect();
        assert_eq!(kinds, vec!["album", "photo"]);
    }

    #[test]
    fn writing_search_uses_entries() {
        let corpus = Corpus {
            photos: vec![photo("a", "p").title("Rust").build()],
            albums: vec![],
            entries: vec![entry("e").title("Rust").build()],
        };
        assert_eq!(search_writing("rust", &corpus).len(), 1);
    }
}
