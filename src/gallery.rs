//! Listing pipeline shared by every photo page.
//!
//! The all-photos page, album pages and tag pages differ only in which
//! photos they start from and which way dates break ties. Everything else
//! is the same recompute:
//!
//! ```text
//! scope(listing) → filter(state) → sort(direction) → available tags
//! ```
//!
//! [`Gallery`] owns the corpus and config and answers [`Gallery::snapshot`]
//! for any listing and state. [`Session`] is one open page: it keeps the
//! current [`FilterState`], reruns the pipeline on each interaction, and
//! hands every result to its [`ViewSync`].
//!
//! The snapshot always carries the complete ordered set; paging it into
//! display batches is the renderer's business.

use crate::config::GalleryConfig;
use crate::corpus::Corpus;
use crate::facets::{self, FacetBounds, FacetOptions};
use crate::filter::{self, FilterState, TagLogic};
use crate::sort::{self, SortDirection};
use crate::sync::ViewSync;
use crate::tags;
use crate::types::{Album, Photo};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Which photos a page lists before any filter applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    AllPhotos,
    /// Album slug.
    Album(String),
    /// Tag, matched after normalization.
    Tag(String),
}

impl Listing {
    /// Date tie-break direction configured for this kind of page.
    pub fn direction(&self, config: &GalleryConfig) -> SortDirection {
        match self {
            Listing::AllPhotos => config.listings.all_photos,
            Listing::Album(_) => config.listings.album,
            Listing::Tag(_) => config.listings.tag,
        }
    }

    /// Photos this page starts from, in corpus order.
    pub fn scope<'a>(&self, photos: &'a [Photo]) -> Vec<&'a Photo> {
        match self {
            Listing::AllPhotos => photos.iter().collect(),
            Listing::Album(slug) => photos.iter().filter(|p| &p.album == slug).collect(),
            Listing::Tag(tag) => photos.iter().filter(|p| tags::has_tag(&p.tags, tag)).collect(),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::AllPhotos => write!(f, "all"),
            Listing::Album(slug) => write!(f, "album:{slug}"),
            Listing::Tag(tag) => write!(f, "tag:{tag}"),
        }
    }
}

impl FromStr for Listing {
    type Err = String;

    /// `all`, `album:<slug>` or `tag:<tag>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "all" {
            return Ok(Listing::AllPhotos);
        }
        match s.split_once(':') {
            Some(("album", slug)) if !slug.trim().is_empty() => {
                Ok(Listing::Album(slug.trim().to_string()))
            }
            Some(("tag", tag)) if !tags::normalize(Some(tag)).is_empty() => {
                Ok(Listing::Tag(tags::normalize(Some(tag))))
            }
            _ => Err(format!(
                "invalid listing '{s}' (expected 'all', 'album:<slug>' or 'tag:<tag>')"
            )),
        }
    }
}

/// Result of one recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    /// Filtered and ordered.
    pub photos: Vec<&'a Photo>,
    pub available_tags: BTreeSet<String>,
}

impl Snapshot<'_> {
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Corpus plus configuration; every listing page queries through here.
#[derive(Debug, Clone)]
pub struct Gallery {
    corpus: Corpus,
    config: GalleryConfig,
}

impl Gallery {
    pub fn new(corpus: Corpus, config: GalleryConfig) -> Self {
        Self { corpus, config }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// The state a page opens with.
    pub fn initial_state(&self) -> FilterState {
        self.config.initial_state()
    }

    /// Filter, sort and compute availability for one listing.
    ///
    /// Ranges that still cover the listing's bounds are ignored.
    pub fn snapshot(&self, listing: &Listing, state: &FilterState) -> Snapshot<'_> {
        let scoped = listing.scope(&self.corpus.photos);
        let state = FacetBounds::from_photos(scoped.iter().copied())
            .fold_full_ranges(state.clone());
        let mut photos = filter::filter(scoped.iter().copied(), &state);
        sort::sort_photos(&mut photos, listing.direction(&self.config));
        let available_tags = facets::available_tags(scoped, &state);
        Snapshot {
            photos,
            available_tags,
        }
    }

    /// Slider defaults for one listing.
    pub fn bounds(&self, listing: &Listing) -> FacetBounds {
        FacetBounds::from_photos(listing.scope(&self.corpus.photos))
    }

    /// Checkbox values, counts and slider bounds for one listing.
    pub fn facets(&self, listing: &Listing) -> FacetOptions {
        FacetOptions::from_photos(listing.scope(&self.corpus.photos))
    }

    /// Albums in canonical order.
    pub fn albums(&self) -> Vec<&Album> {
        let mut albums: Vec<&Album> = self.corpus.albums.iter().collect();
        sort::sort_albums(&mut albums);
        albums
    }

    /// Open a page. The page starts from [`Gallery::initial_state`].
    pub fn session(&self, listing: Listing, view_sync: ViewSync) -> Session<'_> {
        Session {
            gallery: self,
            listing,
            state: self.initial_state(),
            view_sync,
        }
    }
}

/// One open listing page.
#[derive(Debug)]
pub struct Session<'g> {
    gallery: &'g Gallery,
    listing: Listing,
    state: FilterState,
    view_sync: ViewSync,
}

impl<'g> Session<'g> {
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn view_sync_mut(&mut self) -> &mut ViewSync {
        &mut self.view_sync
    }

    /// Replace the whole state and recompute.
    pub fn apply(&mut self, state: FilterState) -> Snapshot<'g> {
        self.state = state;
        self.refresh()
    }

    /// Recompute with the current state and push it out.
    pub fn refresh(&mut self) -> Snapshot<'g> {
        let snapshot = self.gallery.snapshot(&self.listing, &self.state);
        self.view_sync.sync(&self.state, &snapshot.photos);
        snapshot
    }

    pub fn toggle_tag(&mut self, tag: &str) -> Snapshot<'g> {
        let mut state = self.state.clone();
        state.toggle_tag(tag);
        self.apply(state)
    }

    pub fn set_tag_logic(&mut self, logic: TagLogic) -> Snapshot<'g> {
        let state = self.state.clone().with_logic(logic);
        self.apply(state)
    }
}
