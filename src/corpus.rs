//! The in-memory content corpus.
//!
//! The content loader validates frontmatter, merges EXIF-derived fields and
//! writes one JSON document:
//!
//! ```json
//! {
//!   "albums":  [{ "slug": "tokyo", "title": "Tokyo", "date": "2024-03-01" }],
//!   "photos":  [{ "slug": "neon", "album": "tokyo", "title": "Neon", "date": "2024-03-02",
//!                 "tags": ["street", "night"], "settingsRaw": "f/1.7, 1/60s, ISO 1600" }],
//!   "entries": [{ "kind": "post", "slug": "hello", "title": "Hello", "date": "2023-01-01" }]
//! }
//! ```
//!
//! Loading checks only what the engine relies on: photo ids are unique. A
//! photo pointing at an unknown album is kept; it just has no album title.

use crate::types::{Album, Entry, Photo};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate photo id: {0}")]
    DuplicateId(String),
}

/// Every record the engine works over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Corpus {
    /// Parse and check a corpus document.
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let corpus: Corpus = serde_json::from_str(json)?;
        corpus.check_ids()?;
        Ok(corpus)
    }

    fn check_ids(&self) -> Result<(), CorpusError> {
        let mut seen = HashSet::new();
        for photo in &self.photos {
            let id = photo.id();
            if !seen.insert(id.clone()) {
                return Err(CorpusError::DuplicateId(id));
            }
        }
        Ok(())
    }

    pub fn album(&self, slug: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.slug == slug)
    }

    /// Title of an album, `None` when the slug does not resolve.
    pub fn album_title(&self, slug: &str) -> Option<&str> {
        self.album(slug).map(|a| a.title.as_str())
    }

    /// Photos whose album slug matches no album.
    pub fn dangling_album_refs(&self) -> Vec<&Photo> {
        let slugs: HashSet<&str> = self.albums.iter().map(|a| a.slug.as_str()).collect();
        self.photos
            .iter()
            .filter(|p| !slugs.contains(p.album.as_str()))
            .collect()
    }
}

/// Read a corpus JSON file.
pub fn load_corpus(path: &Path) -> Result<Corpus, CorpusError> {
    let content = fs::read_to_string(path)?;
    Corpus::from_json(&content)
}
