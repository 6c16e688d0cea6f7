//! Provider record → [`MediaSummary`] conversion.
//!
//! This is the only place that knows how provider fields degrade: missing,
//! blank and `"N/A"` values all become the documented defaults, and nothing
//! here can fail.

use marquee_api::{MediaKind, ProviderRecord};

use crate::models::{MediaExtras, MediaId, MediaSummary};

/// Overview shown when the provider has no plot.
pub const PLACEHOLDER_OVERVIEW: &str = "No description available.";

/// Sentinel the provider uses for "no value".
pub const MISSING: &str = "N/A";

/// Convert one raw provider record into a summary.
pub fn summarize(record: ProviderRecord) -> MediaSummary {
    let id = match present(record.id) {
        Some(id) => MediaId::Provider(id),
        None => MediaId::local(),
    };

    MediaSummary {
        id,
        title: record.title.unwrap_or_default(),
        overview: present(record.plot).unwrap_or_else(|| PLACEHOLDER_OVERVIEW.to_string()),
        image_ref: present(record.poster),
        rating: parse_rating(record.rating.as_deref()),
        year: record.year.unwrap_or_default(),
        released: present(record.released),
        genre: record.genre.unwrap_or_default(),
        director: record.director.unwrap_or_default(),
        cast: record.actors.unwrap_or_default(),
        runtime: record.runtime.unwrap_or_default(),
        kind: record.kind.as_deref().and_then(MediaKind::parse),
        extras: MediaExtras {
            rated: present(record.rated),
            awards: present(record.awards),
            box_office: present(record.box_office),
            country: present(record.country),
            language: present(record.language),
        },
    }
}

/// Keep a value only if it is non-blank and not the [`MISSING`] sentinel.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != MISSING
    })
}

/// Parse a rating like `"8.3"`. Missing, unparsable or non-finite → 0.
pub fn parse_rating(raw: Option<&str>) -> f32 {
    raw.and_then(|r| r.trim().parse::<f32>().ok())
        .filter(|r| r.is_finite() && *r >= 0.0)
        .unwrap_or(0.0)
}

/// Tidy a comma-joined genre list; `"N/A"` when there is none.
pub fn format_genres(genre: &str) -> String {
    let parts: Vec<&str> = genre
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect();
    if parts.is_empty() {
        MISSING.to_string()
    } else {
        parts.join(", ")
    }
}
