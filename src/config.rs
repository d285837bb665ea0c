//! Engine configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top of it, so
//! a config file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [listings]
//! all_photos = "descending"  # Date tie-break on the all-photos page
//! album = "ascending"        # Album pages read oldest-first
//! tag = "descending"         # Tag pages
//!
//! [filter]
//! tag_logic = "or"           # Tag logic when a page opens: "and" | "or"
//! missing_exif = "exclude"   # Photo lacking a value under a narrowed range:
//!                            # "exclude" | "include"
//!
//! [output]
//! preview_len = 60           # Characters of story/description shown
//! limit = 0                  # Max results printed, 0 = all
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::filter::{FilterState, MissingValue, TagLogic};
use crate::sort::SortDirection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Date direction per listing page.
    pub listings: ListingsConfig,
    /// Initial filter behavior.
    pub filter: FilterConfig,
    /// CLI display settings.
    pub output: OutputConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.preview_len == 0 {
            return Err(ConfigError::Validation(
                "output.preview_len must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// The state a listing page opens with.
    pub fn initial_state(&self) -> FilterState {
        FilterState::new()
            .with_logic(self.filter.tag_logic)
            .with_missing_exif(self.filter.missing_exif)
    }
}

/// Date tie-break direction for each kind of listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingsConfig {
    pub all_photos: SortDirection,
    pub album: SortDirection,
    pub tag: SortDirection,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            all_photos: SortDirection::Descending,
            album: SortDirection::Ascending,
            tag: SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub tag_logic: TagLogic,
    pub missing_exif: MissingValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Characters of free text shown before truncating with `...`.
    pub preview_len: usize,
    /// Maximum results printed; 0 prints everything.
    pub limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            preview_len: 60,
            limit: 0,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of defaults.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Fully-commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-facets configuration
# ===========================
#
# Every key is optional. Delete what you don't change; missing keys fall back
# to the values shown here.

# ---------------------------------------------------------------------------
# Listings
# ---------------------------------------------------------------------------
# Photos sort by order score (highest first), then by date, then by id.
# These set the date direction per page: "ascending" or "descending".
[listings]
all_photos = "descending"
album = "ascending"
tag = "descending"

# ---------------------------------------------------------------------------
# Filter
# ---------------------------------------------------------------------------
[filter]
# How selected tags combine when a page opens: "or" (any) or "and" (all).
tag_logic = "or"
# Once a range slider (aperture, shutter, ISO, focal length, date) is narrowed,
# what happens to photos that do not record that value:
# "exclude" hides them, "include" keeps them.
missing_exif = "exclude"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Characters of story/description shown per result.
preview_len = 60
# Maximum number of results printed (0 = all).
limit = 0
"##
}
