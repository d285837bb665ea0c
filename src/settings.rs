//! Camera settings string parser.
//!
//! Photo frontmatter carries exposure settings as one human-readable string,
//! e.g. `"f/2.8, 1/250s, ISO 400"`. The range facets need numbers, so this
//! module pulls three fields back out of it:
//!
//! - **Aperture**: `f/<number>` → `2.8`
//! - **Shutter speed**: `<num>/<den>s` → `num / den` seconds, or `<num>s`
//!   → decimal seconds. The fraction form wins when both could apply.
//! - **ISO**: `ISO <integer>`, literal matched case-insensitively with any
//!   amount of whitespace (including none) before the digits.
//!
//! Each field is independent. A string that mentions only ISO yields only
//! ISO; an empty or missing string yields [`ExifSettings::default`]. Parsing
//! never fails.
//!
//! Patterns are compiled once on first use and matched case-insensitively.

use regex::Regex;
use std::sync::LazyLock;

static APERTURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)f/(\d+(?:\.\d+)?)").expect("aperture regex"));

static FRACTION_SHUTTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)s").expect("fraction shutter regex")
});

/// The leading group keeps a fraction's denominator from matching on its own.
static DECIMAL_SHUTTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\d./])(\d+(?:\.\d+)?)s").expect("decimal shutter regex")
});

static ISO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)iso\s*(\d+)").expect("iso regex"));

/// Numeric exposure values recovered from a settings string.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExifSettings {
    pub aperture: Option<f64>,
    /// Seconds.
    pub shutter_speed: Option<f64>,
    pub iso: Option<u32>,
}

impl ExifSettings {
    pub fn is_empty(&self) -> bool {
        self.aperture.is_none() && self.shutter_speed.is_none() && self.iso.is_none()
    }
}

/// Parse a free-form settings string.
pub fn parse_settings(raw: Option<&str>) -> ExifSettings {
    let Some(raw) = raw else {
        return ExifSettings::default();
    };
    ExifSettings {
        aperture: first_capture(&APERTURE, raw),
        shutter_speed: fraction_shutter(raw).or_else(|| first_capture(&DECIMAL_SHUTTER, raw)),
        iso: first_capture(&ISO, raw),
    }
}

/// First match whose capture group 1 parses as `T`.
fn first_capture<T: std::str::FromStr>(re: &Regex, raw: &str) -> Option<T> {
    re.captures_iter(raw).find_map(|caps| caps.get(1)?.as_str().parse().ok())
}

/// `<num>/<den>s`. A zero denominator is treated as no match.
fn fraction_shutter(raw: &str) -> Option<f64> {
    FRACTION_SHUTTER.captures_iter(raw).find_map(|caps| {
        let num: f64 = caps[1].parse().ok()?;
        let den: f64 = caps[2].parse().ok()?;
        (den != 0.0).then_some(num / den)
    })
}
