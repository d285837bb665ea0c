//! Shared test utilities for the photo-facets test suite.
//!
//! Provides record builders with sensible defaults, lookup helpers that panic
//! with a clear message on a miss, and bulk extractors for asserting order.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let neon = photo("tokyo", "neon")
//!     .tags(&["street", "night"])
//!     .settings("f/1.7, 1/60s, ISO 1600")
//!     .date("2024-03-02")
//!     .build();
//!
//! let corpus = load_fixture_corpus();
//! let photo = find_photo(&corpus, "tokyo/neon-alley");
//! assert_eq!(photo.album, "tokyo");
//! ```

use chrono::NaiveDate;
use std::path::Path;

use crate::corpus::{self, Corpus};
use crate::types::{Album, Entry, EntryKind, Photo};

const DEFAULT_DATE: &str = "2024-01-01";

/// Parse a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|e| panic!("bad date '{s}': {e}"))
}

// =========================================================================
// Fixture corpus
// =========================================================================

/// Load `fixtures/corpus.json`.
pub fn load_fixture_corpus() -> Corpus {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/corpus.json");
    corpus::load_corpus(&path).unwrap()
}

// =========================================================================
// Builders
// =========================================================================

/// Start a photo with title = slug, no tags, dated 2024-01-01.
pub fn photo(album: &str, slug: &str) -> PhotoBuilder {
    PhotoBuilder(Photo {
        slug: slug.to_string(),
        album: album.to_string(),
        title: slug.to_string(),
        tags: Vec::new(),
        date: date(DEFAULT_DATE),
        camera: None,
        settings_raw: None,
        focal_length: None,
        order_score: 0.0,
        location: None,
        story: None,
    })
}

pub struct PhotoBuilder(Photo);

impl PhotoBuilder {
    pub fn title(mut self, title: &str) -> Self {
        self.0.title = title.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.0.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn date(mut self, d: &str) -> Self {
        self.0.date = date(d);
        self
    }

    pub fn camera(mut self, camera: &str) -> Self {
        self.0.camera = Some(camera.to_string());
        self
    }

    pub fn settings(mut self, raw: &str) -> Self {
        self.0.settings_raw = Some(raw.to_string());
        self
    }

    pub fn focal_length(mut self, mm: f64) -> Self {
        self.0.focal_length = Some(mm);
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.0.order_score = score;
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.0.location = Some(location.to_string());
        self
    }

    pub fn story(mut self, story: &str) -> Self {
        self.0.story = Some(story.to_string());
        self
    }

    pub fn build(self) -> Photo {
        self.0
    }
}

/// Start an album with title = slug, dated 2024-01-01.
pub fn album(slug: &str) -> AlbumBuilder {
    AlbumBuilder(Album {
        slug: slug.to_string(),
        title: slug.to_string(),
        description: None,
        date: date(DEFAULT_DATE),
        featured: false,
        order_score: 0.0,
    })
}

pub struct AlbumBuilder(Album);

impl AlbumBuilder {
    pub fn title(mut self, title: &str) -> Self {
        self.0.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.0.description = Some(description.to_string());
        self
    }

    pub fn date(mut self, d: &str) -> Self {
        self.0.date = date(d);
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.0.order_score = score;
        self
    }

    pub fn featured(mut self) -> Self {
        self.0.featured = true;
        self
    }

    pub fn build(self) -> Album {
        self.0
    }
}

/// Start a post with title = slug and an empty body.
pub fn entry(slug: &str) -> EntryBuilder {
    EntryBuilder(Entry {
        kind: EntryKind::Post,
        slug: slug.to_string(),
        title: slug.to_string(),
        description: None,
        body: String::new(),
        tags: Vec::new(),
        date: date(DEFAULT_DATE),
    })
}

pub struct EntryBuilder(Entry);

impl EntryBuilder {
    pub fn project(mut self) -> Self {
        self.0.kind = EntryKind::Project;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.0.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.0.description = Some(description.to_string());
        self
    }

    pub fn body(mut self, markdown: &str) -> Self {
        self.0.body = markdown.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.0.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn date(mut self, d: &str) -> Self {
        self.0.date = date(d);
        self
    }

    pub fn build(self) -> Entry {
        self.0
    }
}

// =========================================================================
// Corpus lookups: panic with a clear message on miss
// =========================================================================

/// Find a photo by `album/slug` id. Panics if not found.
pub fn find_photo<'a>(corpus: &'a Corpus, id: &str) -> &'a Photo {
    corpus
        .photos
        .iter()
        .find(|p| p.id() == id)
        .unwrap_or_else(|| {
            let ids: Vec<String> = corpus.photos.iter().map(Photo::id).collect();
            panic!("photo '{id}' not found. Available: {ids:?}")
        })
}

/// Find an album by slug. Panics if not found.
pub fn find_album<'a>(corpus: &'a Corpus, slug: &str) -> &'a Album {
    corpus.album(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = corpus.albums.iter().map(|a| a.slug.as_str()).collect();
        panic!("album '{slug}' not found. Available: {slugs:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Photo slugs in the given order.
pub fn slugs<'a>(photos: &[&'a Photo]) -> Vec<&'a str> {
    photos.iter().map(|p| p.slug.as_str()).collect()
}
