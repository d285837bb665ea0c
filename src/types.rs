//! Content records shared by every engine module.
//!
//! These are the shapes the content loader hands over after schema
//! validation. They deserialize from the camelCase JSON the loader emits and
//! are never mutated by the engine.

use crate::settings::{self, ExifSettings};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One published photograph.
///
/// Parsed EXIF values are not stored: [`Photo::exif`] derives them from
/// `settings_raw` on every call, since the raw string is what frontmatter
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Slug within the album (filename stem).
    pub slug: String,
    /// Slug of the owning album. May dangle.
    pub album: String,
    pub title: String,
    /// Display order is kept; comparisons go through [`crate::tags::normalize`].
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    /// Free-form EXIF string such as `"f/2.8, 1/250s, ISO 400"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_raw: Option<String>,
    /// Focal length in millimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,
    /// Manual ranking weight; higher sorts first.
    #[serde(default)]
    pub order_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
}

impl Photo {
    /// Corpus-wide identifier, `album/slug`.
    pub fn id(&self) -> String {
        format!("{}/{}", self.album, self.slug)
    }

    /// Parse the raw settings string.
    pub fn exif(&self) -> ExifSettings {
        settings::parse_settings(self.settings_raw.as_deref())
    }
}

/// A named collection of photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order_score: f64,
}

/// Which writing collection an [`Entry`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Post,
    Project,
}

/// A blog post or project write-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub kind: EntryKind,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown source.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: NaiveDate,
}
