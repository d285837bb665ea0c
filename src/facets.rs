//! Facet availability and facet option lists.
//!
//! The filter panel needs three things besides the filtered photos:
//!
//! - which tags are still worth offering ([`available_tags`]),
//! - the values and counts behind each checkbox list ([`tag_counts`],
//!   [`album_options`], [`camera_options`]),
//! - the full bounds each range slider starts at ([`FacetBounds`]).
//!
//! ## Tag availability
//!
//! In OR mode adding a tag can only widen the result, so every tag in the
//! corpus stays available. In AND mode each extra tag narrows, so only tags
//! carried by the photos that currently survive the filter are offered.
//! Selected tags are always part of the answer so the user can deselect them,
//! even when another control has made them unreachable.

use crate::filter::{self, FilterState, Range, TagLogic};
use crate::tags;
use crate::types::Photo;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Tags that can be selected without forcing an empty result.
pub fn available_tags<'a, I>(photos: I, state: &FilterState) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Photo>,
{
    let mut available: BTreeSet<String> = match state.tag_logic {
        TagLogic::Or => photos
            .into_iter()
            .flat_map(|p| tags::tag_set(&p.tags))
            .collect(),
        TagLogic::And => filter::filter(photos, state)
            .into_iter()
            .flat_map(|p| tags::tag_set(&p.tags))
            .collect(),
    };
    available.extend(state.selected_tags.iter().cloned());
    available
}

/// Photo count per normalized tag.
pub fn tag_counts<'a, I>(photos: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Photo>,
{
    let mut counts = BTreeMap::new();
    for photo in photos {
        for tag in tags::tag_set(&photo.tags) {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    counts
}

/// Photo count per album slug.
pub fn album_options<'a, I>(photos: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Photo>,
{
    let mut counts = BTreeMap::new();
    for photo in photos {
        *counts.entry(photo.album.clone()).or_insert(0) += 1;
    }
    counts
}

/// Photo count per camera. Photos without a camera are not counted.
pub fn camera_options<'a, I>(photos: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Photo>,
{
    let mut counts = BTreeMap::new();
    for camera in photos.into_iter().filter_map(|p| p.camera.as_deref()) {
        let camera = camera.trim();
        if !camera.is_empty() {
            *counts.entry(camera.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Full default bounds of every range facet.
///
/// A dimension no photo measures is `None`; the UI hides its slider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetBounds {
    pub date: Option<Range<NaiveDate>>,
    pub aperture: Option<Range<f64>>,
    pub shutter: Option<Range<f64>>,
    pub iso: Option<Range<u32>>,
    pub focal_length: Option<Range<f64>>,
}

impl FacetBounds {
    pub fn from_photos<'a, I: IntoIterator<Item = &'a Photo>>(photos: I) -> Self {
        let photos: Vec<&Photo> = photos.into_iter().collect();
        let exif: Vec<_> = photos.iter().map(|p| p.exif()).collect();
        Self {
            date: Range::span(photos.iter().map(|p| p.date)),
            aperture: Range::span(exif.iter().filter_map(|e| e.aperture)),
            shutter: Range::span(exif.iter().filter_map(|e| e.shutter_speed)),
            iso: Range::span(exif.iter().filter_map(|e| e.iso)),
            focal_length: Range::span(photos.iter().filter_map(|p| p.focal_length)),
        }
    }

    /// Build a state from raw slider values, leaving untouched sliders inert.
    pub fn apply_ranges(&self, sliders: RangeControls, mut state: FilterState) -> FilterState {
        state.date = sliders.date;
        state.aperture = sliders.aperture;
        state.shutter = sliders.shutter;
        state.iso = sliders.iso;
        state.focal_length = sliders.focal_length;
        self.fold_full_ranges(state)
    }

    /// Drop every range in `state` that still covers these bounds.
    pub fn fold_full_ranges(&self, mut state: FilterState) -> FilterState {
        state.date = state.date.and_then(|r| r.narrowed_from(self.date));
        state.aperture = state.aperture.and_then(|r| r.narrowed_from(self.aperture));
        state.shutter = state.shutter.and_then(|r| r.narrowed_from(self.shutter));
        state.iso = state.iso.and_then(|r| r.narrowed_from(self.iso));
        state.focal_length = state
            .focal_length
            .and_then(|r| r.narrowed_from(self.focal_length));
        state
    }
}

/// Everything the filter panel lists for one set of photos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetOptions {
    pub tags: BTreeMap<String, usize>,
    pub albums: BTreeMap<String, usize>,
    pub cameras: BTreeMap<String, usize>,
    pub bounds: FacetBounds,
}

impl FacetOptions {
    pub fn from_photos<'a, I: IntoIterator<Item = &'a Photo>>(photos: I) -> Self {
        let photos: Vec<&Photo> = photos.into_iter().collect();
        Self {
            tags: tag_counts(photos.iter().copied()),
            albums: album_options(photos.iter().copied()),
            cameras: camera_options(photos.iter().copied()),
            bounds: FacetBounds::from_photos(photos),
        }
    }
}

/// Raw slider positions as read from the page.
#[derive(Debug, Clone, Default)]
pub struct RangeControls {
    pub date: Option<Range<NaiveDate>>,
    pub aperture: Option<Range<f64>>,
    pub shutter: Option<Range<f64>>,
    pub iso: Option<Range<u32>>,
    pub focal_length: Option<Range<f64>>,
}
