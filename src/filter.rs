//! Facet filter engine.
//!
//! Applies a [`FilterState`] to a photo corpus. Eight dimensions are combined
//! with a logical AND: a photo survives only if it passes every active one.
//!
//! | Dimension | Active when | Passes when |
//! |-----------|-------------|-------------|
//! | tags | selection non-empty | all (AND) / any (OR) selected tags present |
//! | albums | selection non-empty | photo's album is selected |
//! | cameras | selection non-empty | photo's camera is selected |
//! | date, aperture, shutter, ISO, focal length | range is `Some` | value inside the inclusive range |
//!
//! An empty selection or a `None` range imposes no constraint. This is the
//! invariant the UI depends on: clearing every control must show the whole
//! corpus, never nothing.
//!
//! ## Missing values
//!
//! A photo with no aperture (or shutter, ISO, focal length) cannot be shown
//! to satisfy a real range. Under [`MissingValue::Exclude`] (the default) it
//! is dropped as soon as that range is active; [`MissingValue::Include`] lets
//! it through instead. Inert ranges never look at the value.
//!
//! ## Full-range sliders
//!
//! UI sliders start at the corpus bounds. [`Range::narrowed_from`] turns a
//! slider value back into `None` when it still covers those bounds, so an
//! untouched slider stays inert. Because the decision lives in the state and
//! not in the corpus, re-filtering a result with the same state is a no-op.
//!
//! Ranges are not sanitized: `min > max` matches nothing.

use crate::tags::{self, normalize};
use crate::types::Photo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How selected tags combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagLogic {
    /// Every selected tag must be present.
    And,
    /// Any selected tag is enough.
    #[default]
    Or,
}

impl fmt::Display for TagLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagLogic::And => write!(f, "and"),
            TagLogic::Or => write!(f, "or"),
        }
    }
}

impl FromStr for TagLogic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "all" => Ok(TagLogic::And),
            "or" | "any" => Ok(TagLogic::Or),
            other => Err(format!("unknown tag logic '{other}' (expected 'and' or 'or')")),
        }
    }
}

/// What an active range does with a photo that lacks the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingValue {
    #[default]
    Exclude,
    Include,
}

/// Inclusive `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Smallest range holding every value, `None` for no values.
    pub fn span<I: IntoIterator<Item = T>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Range::new(v, v)),
            Some(r) => Some(Range::new(
                if v < r.min { v } else { r.min },
                if v > r.max { v } else { r.max },
            )),
        })
    }

    /// `None` when this range still covers `bounds`, i.e. the control has
    /// not been narrowed and the dimension should stay inert.
    pub fn narrowed_from(self, bounds: Option<Range<T>>) -> Option<Self> {
        match bounds {
            Some(b) if self.min <= b.min && self.max >= b.max => None,
            _ => Some(self),
        }
    }
}

/// Snapshot of every filter control on a listing page.
///
/// Rebuilt from the controls on each interaction and never mutated by the
/// engine. `Default` is the unconstrained state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Normalized tag values.
    pub selected_tags: BTreeSet<String>,
    pub tag_logic: TagLogic,
    /// Album slugs.
    pub selected_albums: BTreeSet<String>,
    pub selected_cameras: BTreeSet<String>,
    pub date: Option<Range<NaiveDate>>,
    pub aperture: Option<Range<f64>>,
    /// Seconds.
    pub shutter: Option<Range<f64>>,
    pub iso: Option<Range<u32>>,
    /// Millimetres.
    pub focal_length: Option<Range<f64>>,
    pub missing_exif: MissingValue,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tag selection. Tags are normalized; blanks are dropped.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected_tags = tags
            .into_iter()
            .map(|t| normalize(Some(t.as_ref())))
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn with_logic(mut self, logic: TagLogic) -> Self {
        self.tag_logic = logic;
        self
    }

    pub fn with_albums<I, S>(mut self, albums: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_albums = albums.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cameras<I, S>(mut self, cameras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_cameras = cameras
            .into_iter()
            .map(|c| c.into().trim().to_string())
            .collect();
        self
    }

    pub fn with_missing_exif(mut self, policy: MissingValue) -> Self {
        self.missing_exif = policy;
        self
    }

    /// Select a tag if it is not selected, deselect it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        let tag = normalize(Some(tag));
        if tag.is_empty() {
            return;
        }
        if !self.selected_tags.remove(&tag) {
            self.selected_tags.insert(tag);
        }
    }

    /// True when no dimension imposes a constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.selected_tags.is_empty()
            && self.selected_albums.is_empty()
            && self.selected_cameras.is_empty()
            && self.date.is_none()
            && self.aperture.is_none()
            && self.shutter.is_none()
            && self.iso.is_none()
            && self.focal_length.is_none()
    }

    fn uses_exif(&self) -> bool {
        self.aperture.is_some() || self.shutter.is_some() || self.iso.is_some()
    }
}

/// Photos passing every active dimension, in input order.
///
/// Takes any iterator of photo references so listing pages can pass a
/// pre-scoped subset as easily as a whole slice.
pub fn filter<'a, I>(photos: I, state: &FilterState) -> Vec<&'a Photo>
where
    I: IntoIterator<Item = &'a Photo>,
{
    photos.into_iter().filter(|p| matches(p, state)).collect()
}

/// Whether one photo passes every active dimension.
pub fn matches(photo: &Photo, state: &FilterState) -> bool {
    if !matches_tags(photo, &state.selected_tags, state.tag_logic) {
        return false;
    }
    if !state.selected_albums.is_empty() && !state.selected_albums.contains(&photo.album) {
        return false;
    }
    if !state.selected_cameras.is_empty() {
        let camera = photo.camera.as_deref().map(str::trim);
        if !camera.is_some_and(|c| state.selected_cameras.contains(c)) {
            return false;
        }
    }

    let missing = state.missing_exif;
    if !in_range(state.date.as_ref(), Some(photo.date), missing)
        || !in_range(state.focal_length.as_ref(), photo.focal_length, missing)
    {
        return false;
    }

    if state.uses_exif() {
        let exif = photo.exif();
        if !in_range(state.aperture.as_ref(), exif.aperture, missing)
            || !in_range(state.shutter.as_ref(), exif.shutter_speed, missing)
            || !in_range(state.iso.as_ref(), exif.iso, missing)
        {
            return false;
        }
    }

    true
}

/// Tag dimension alone. An empty selection passes everything.
pub fn matches_tags(photo: &Photo, selected: &BTreeSet<String>, logic: TagLogic) -> bool {
    if selected.is_empty() {
        return true;
    }
    let photo_tags = tags::tag_set(&photo.tags);
    match logic {
        TagLogic::And => selected.iter().all(|t| photo_tags.contains(t)),
        TagLogic::Or => selected.iter().any(|t| photo_tags.contains(t)),
    }
}

fn in_range<T: PartialOrd + Copy>(
    range: Option<&Range<T>>,
    value: Option<T>,
    missing: MissingValue,
) -> bool {
    match (range, value) {
        (None, _) => true,
        (Some(r), Some(v)) => r.contains(v),
        (Some(_), None) => missing == MissingValue::Include,
    }
}
