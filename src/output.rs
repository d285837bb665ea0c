//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Every result leads with its positional index and title. The photo id,
//! album, date and gear follow as indented context lines, so the output
//! reads as an ordered inventory while still pointing at the exact record.
//!
//! # Output Format
//!
//! ## Filter
//!
//! ```text
//! Listing all: 2 photos
//! 001 Neon Alley (tokyo/neon-alley)
//!     Album: Tokyo Nights
//!     Date: 2024-03-02
//!     Tags: Street, Night
//!     Camera: Fujifilm X100V
//!     Settings: f/2, 1/60s, ISO 3200
//!     Focal length: 23mm
//!     Rain on the signs, **everything** reflected twice.
//! 002 Crossing (tokyo/crossing)
//!     ...
//!
//! Available tags
//!     night, street
//! ```
//!
//! ## Facets
//!
//! ```text
//! Tags
//!     architecture (2)
//!     street (3)
//! Cameras
//!     Leica Q2 (2)
//! Ranges
//!     Date: 1999-06-01 .. 2024-03-03
//!     Shutter: 1/500s .. 2s
//! ```
//!
//! ## Search
//!
//! ```text
//! Albums
//! 001 Tokyo Nights (relevance 1)
//!     Two weeks of rain and neon in Shinjuku and Shibuya.
//! Photos
//! 001 Neon Alley (tokyo/neon-alley, relevance 2)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::OutputConfig;
use crate::corpus::Corpus;
use crate::facets::{FacetBounds, FacetOptions};
use crate::filter::Range;
use crate::gallery::{Listing, Snapshot};
use crate::search::{PhotographyResults, SearchHit};
use crate::types::{Entry, EntryKind, Photo};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Collapse runs of whitespace, including newlines, to single spaces.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Number of results to print under the configured limit.
fn shown(total: usize, config: &OutputConfig) -> usize {
    match config.limit {
        0 => total,
        limit => total.min(limit),
    }
}

/// `... N more` when the limit cut the list short.
fn more_line(shown: usize, total: usize, depth: usize) -> Option<String> {
    (total > shown).then(|| format!("{}... {} more", indent(depth), total - shown))
}

fn format_focal(mm: f64) -> String {
    if mm.fract() == 0.0 {
        format!("{mm:.0}mm")
    } else {
        format!("{mm}mm")
    }
}

/// `1/250s` below one second, `2s` above.
fn format_shutter(seconds: f64) -> String {
    if seconds > 0.0 && seconds < 1.0 {
        format!("1/{}s", (1.0 / seconds).round())
    } else {
        format!("{seconds}s")
    }
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Post => "post",
        EntryKind::Project => "project",
    }
}

/// Header plus context lines for one photo.
///
/// ```text
/// 001 Neon Alley (tokyo/neon-alley)
///     Album: Tokyo Nights
///     Date: 2024-03-02
/// ```
fn photo_lines(index: usize, photo: &Photo, corpus: &Corpus, config: &OutputConfig) -> Vec<String> {
    let ctx = indent(1);
    let mut lines = vec![format!(
        "{} {} ({})",
        format_index(index),
        photo.title,
        photo.id()
    )];
    match corpus.album_title(&photo.album) {
        Some(title) => lines.push(format!("{ctx}Album: {title}")),
        None => lines.push(format!("{ctx}Album: {} (missing)", photo.album)),
    }
    lines.push(format!("{ctx}Date: {}", photo.date));
    if !photo.tags.is_empty() {
        lines.push(format!("{ctx}Tags: {}", photo.tags.join(", ")));
    }
    if let Some(ref camera) = photo.camera {
        lines.push(format!("{ctx}Camera: {camera}"));
    }
    if let Some(ref raw) = photo.settings_raw {
        lines.push(format!("{ctx}Settings: {raw}"));
    }
    if let Some(mm) = photo.focal_length {
        lines.push(format!("{ctx}Focal length: {}", format_focal(mm)));
    }
    if let Some(ref story) = photo.story {
        let preview = truncate_desc(&one_line(story), config.preview_len);
        if !preview.is_empty() {
            lines.push(format!("{ctx}{preview}"));
        }
    }
    lines
}

// ============================================================================
// Filter output
// ============================================================================

/// Format a filtered listing: ordered photos, then the tags still on offer.
pub fn format_listing(
    listing: &Listing,
    snapshot: &Snapshot<'_>,
    corpus: &Corpus,
    config: &OutputConfig,
) -> Vec<String> {
    let total = snapshot.len();
    let mut lines = vec![format!(
        "Listing {listing}: {total} photo{}",
        if total == 1 { "" } else { "s" }
    )];

    let count = shown(total, config);
    for (i, photo) in snapshot.photos.iter().take(count).enumerate() {
        lines.extend(photo_lines(i + 1, photo, corpus, config));
    }
    lines.extend(more_line(count, total, 0));

    lines.push(String::new());
    lines.push("Available tags".to_string());
    lines.push(format!("{}{}", indent(1), tag_list(&snapshot.available_tags)));
    lines
}

fn tag_list(tags: &BTreeSet<String>) -> String {
    if tags.is_empty() {
        "(none)".to_string()
    } else {
        tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

/// Print a filtered listing to stdout.
pub fn print_listing(
    listing: &Listing,
    snapshot: &Snapshot<'_>,
    corpus: &Corpus,
    config: &OutputConfig,
) {
    for line in format_listing(listing, snapshot, corpus, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Facet output
// ============================================================================

/// Format the filter panel: option counts per list, then range bounds.
pub fn format_facets(options: &FacetOptions) -> Vec<String> {
    let mut lines = Vec::new();
    for (heading, counts) in [
        ("Tags", &options.tags),
        ("Albums", &options.albums),
        ("Cameras", &options.cameras),
    ] {
        lines.extend(option_section(heading, counts));
    }
    lines.extend(range_section(&options.bounds));
    lines
}

fn option_section(heading: &str, counts: &BTreeMap<String, usize>) -> Vec<String> {
    if counts.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![heading.to_string()];
    for (value, n) in counts {
        lines.push(format!("{}{} ({})", indent(1), value, n));
    }
    lines
}

fn range_section(bounds: &FacetBounds) -> Vec<String> {
    fn line<T: Copy>(label: &str, range: Option<Range<T>>, show: impl Fn(T) -> String) -> String {
        match range {
            Some(r) => format!("{}{label}: {} .. {}", indent(1), show(r.min), show(r.max)),
            None => format!("{}{label}: (no data)", indent(1)),
        }
    }
    fn plain<T: Display>(v: T) -> String {
        v.to_string()
    }

    vec![
        "Ranges".to_string(),
        line("Date", bounds.date, plain),
        line("Aperture", bounds.aperture, |f| format!("f/{f}")),
        line("Shutter", bounds.shutter, format_shutter),
        line("ISO", bounds.iso, plain),
        line("Focal length", bounds.focal_length, format_focal),
    ]
}

/// Print the filter panel to stdout.
pub fn print_facets(options: &FacetOptions) {
    for line in format_facets(options) {
        println!("{}", line);
    }
}

// ============================================================================
// Search output
// ============================================================================

/// Format photography search results: album hits, then photo hits.
pub fn format_search(
    query: &str,
    results: &PhotographyResults<'_>,
    config: &OutputConfig,
) -> Vec<String> {
    if results.is_empty() {
        return vec![format!("No results for '{}'", query.trim())];
    }
    let mut lines = Vec::new();

    if !results.albums.is_empty() {
        lines.push("Albums".to_string());
        let count = shown(results.albums.len(), config);
        for (i, hit) in results.albums.iter().take(count).enumerate() {
            lines.push(format!(
                "{} {} (relevance {})",
                format_index(i + 1),
                hit.item.title,
                hit.relevance
            ));
            if let Some(ref desc) = hit.item.description {
                let preview = truncate_desc(&one_line(desc), config.preview_len);
                if !preview.is_empty() {
                    lines.push(format!("{}{}", indent(1), preview));
                }
            }
        }
        lines.extend(more_line(count, results.albums.len(), 0));
    }

    if !results.photos.is_empty() {
        lines.push("Photos".to_string());
        let count = shown(results.photos.len(), config);
        for (i, hit) in results.photos.iter().take(count).enumerate() {
            lines.push(format!(
                "{} {} ({}, relevance {})",
                format_index(i + 1),
                hit.item.title,
                hit.item.id(),
                hit.relevance
            ));
        }
        lines.extend(more_line(count, results.photos.len(), 0));
    }
    lines
}

/// Print photography search results to stdout.
pub fn print_search(query: &str, results: &PhotographyResults<'_>, config: &OutputConfig) {
    for line in format_search(query, results, config) {
        println!("{}", line);
    }
}

/// Format writing search results, newest first.
///
/// ```text
/// Writing
/// 001 Street photography, Tokyo 2024 [post, 2024-04-01]
///     Notes from a rainy fortnight.
/// ```
pub fn format_writing(
    query: &str,
    hits: &[SearchHit<'_, Entry>],
    config: &OutputConfig,
) -> Vec<String> {
    if hits.is_empty() {
        return vec![format!("No results for '{}'", query.trim())];
    }
    let mut lines = vec!["Writing".to_string()];
    let count = shown(hits.len(), config);
    for (i, hit) in hits.iter().take(count).enumerate() {
        let entry = hit.item;
        lines.push(format!(
            "{} {} [{}, {}]",
            format_index(i + 1),
            entry.title,
            kind_label(entry.kind),
            entry.date
        ));
        if let Some(ref desc) = entry.description {
            let preview = truncate_desc(&one_line(desc), config.preview_len);
            if !preview.is_empty() {
                lines.push(format!("{}{}", indent(1), preview));
            }
        }
    }
    lines.extend(more_line(count, hits.len(), 0));
    lines
}

/// Print writing search results to stdout.
pub fn print_writing(query: &str, hits: &[SearchHit<'_, Entry>], config: &OutputConfig) {
    for line in format_writing(query, hits, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format corpus totals and every photo whose album does not resolve.
pub fn format_check(corpus: &Corpus) -> Vec<String> {
    let mut lines = vec![
        "Corpus".to_string(),
        format!(
            "{}{} photos, {} albums, {} entries",
            indent(1),
            corpus.photos.len(),
            corpus.albums.len(),
            corpus.entries.len()
        ),
    ];
    let dangling = corpus.dangling_album_refs();
    if !dangling.is_empty() {
        lines.push("Dangling album references".to_string());
        for photo in dangling {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                photo.id(),
                photo.album
            ));
        }
    }
    lines
}

/// Print check output to stdout.
pub fn print_check(corpus: &Corpus) {
    for line in format_check(corpus) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
