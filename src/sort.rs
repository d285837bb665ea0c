//! Canonical ordering for every listing.
//!
//! The same photo must land in the same relative position whether it is
//! reached from the all-photos page, its album, a tag page or search, so all
//! of them sort through here.
//!
//! ```text
//! photos:  order_score desc → date (per listing) → id asc
//! albums:  featured first → order_score desc → date desc → slug asc
//! entries: date desc → slug asc
//! ```
//!
//! The trailing key is a stabilizer: it makes the order total, so two runs
//! over the same input never disagree. Scores compare with
//! [`f64::total_cmp`], which also keeps a stray NaN from panicking.

use crate::types::{Album, Entry, Photo};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Direction of the date tie-break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortDirection {
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => Ok(SortDirection::Ascending),
            "desc" | "descending" | "newest" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// Higher score first.
pub fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

pub fn compare_photos(a: &Photo, b: &Photo, direction: SortDirection) -> Ordering {
    by_score_desc(a.order_score, b.order_score)
        .then_with(|| direction.apply(a.date.cmp(&b.date)))
        .then_with(|| compare_ids(a, b))
}

/// Album, then slug. Unique per photo, so it never ties for distinct photos.
pub fn compare_ids(a: &Photo, b: &Photo) -> Ordering {
    a.album
        .cmp(&b.album)
        .then_with(|| a.slug.cmp(&b.slug))
}

pub fn compare_albums(a: &Album, b: &Album) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| by_score_desc(a.order_score, b.order_score))
        .then_with(|| b.date.cmp(&a.date))
        .then_with(|| a.slug.cmp(&b.slug))
}

pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
}

/// Sort photo references in place.
pub fn sort_photos(photos: &mut [&Photo], direction: SortDirection) {
    photos.sort_by(|a, b| compare_photos(a, b, direction));
}

pub fn sort_albums(albums: &mut [&Album]) {
    albums.sort_by(|a, b| compare_albums(a, b));
}

pub fn sort_entries(entries: &mut [&Entry]) {
    entries.sort_by(|a, b| compare_entries(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn higher_order_score_first() {
        let low = photo("a", "low").score(0.0).date("2024-12-01").build();
        let high = photo("a", "high").score(5.0).date("2020-01-01").build();
        let mut photos = vec![&low, &high];
        sort_photos(&mut photos, SortDirection::Descending);
        assert_eq!(slugs(&photos), vec!["high", "low"]);
    }

    #[test]
    fn date_tie_break_follows_direction() {
        let old = photo("a", "old").date("2021-01-01").build();
        let new = photo("a", "new").date("2024-01-01").build();

        let mut photos = vec![&old, &new];
        sort_photos(&mut photos, SortDirection::Descending);
        assert_eq!(slugs(&photos), vec!["new", "old"]);

        sort_photos(&mut photos, SortDirection::Ascending);
        assert_eq!(slugs(&photos), vec!["old", "new"]);
    }

    #[test]
    fn slug_stabilizes_full_ties() {
        let a = photo("x", "a-photo").date("2024-01-01").build();
        let b = photo("x", "b-photo").date("2024-01-01").build();
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let mut photos = vec![&b, &a];
            sort_photos(&mut photos, direction);
            assert_eq!(slugs(&photos), vec!["a-photo", "b-photo"]);
        }
    }

    #[test]
    fn album_is_part_of_the_stabilizer() {
        let a = photo("alps", "same").build();
        let b = photo("tokyo", "same").build();
        assert_eq!(
            compare_photos(&b, &a, SortDirection::Descending),
            Ordering::Greater
        );
    }

    #[test]
    fn nan_score_does_not_panic() {
        let nan = photo("a", "nan").score(f64::NAN).build();
        let one = photo("a", "one").score(1.0).build();
        let mut photos = vec![&one, &nan];
        sort_photos(&mut photos, SortDirection::Descending);
        assert_eq!(photos.len(), 2);
    }

    #[test]
    fn featured_albums_first_then_score_then_newest() {
        let plain_new = album("plain-new").date("2024-05-01").build();
        let plain_old = album("plain-old").date("2020-05-01").build();
        let scored = album("scored").score(3.0).date("2019-01-01").build();
        let featured = album("featured").featured().date("2010-01-01").build();

        let mut albums = vec![&plain_old, &scored, &plain_new, &featured];
        sort_albums(&mut albums);
        let order: Vec<&str> = albums.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(order, vec!["featured", "scored", "plain-new", "plain-old"]);
    }

    #[test]
    fn entries_newest_first() {
        let old = entry("old").date("2020-01-01").build();
        let new = entry("new").date("2023-01-01").build();
        let mut entries = vec![&old, &new];
        sort_entries(&mut entries);
        assert_eq!(entries[0].slug, "new");
    }

    #[test]
    fn direction_parses() {
        assert_eq!(
            "asc".parse::<SortDirection>().unwrap(),
            SortDirection::Ascending
        );
        assert_eq!(
            "Descending".parse::<SortDirection>().unwrap(),
            SortDirection::Descending
        );
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
