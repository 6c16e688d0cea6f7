use serde::{Deserialize, Serialize};

use crate::normalize::PLACEHOLDER_OVERVIEW;
use marquee_api::MediaKind;

/// Identifier of a summary: provider-assigned, or generated locally when the
/// provider record carried none. Local ids differ on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaId {
    Provider(String),
    Local(String),
}

impl MediaId {
    /// A fresh random local id.
    pub fn local() -> Self {
        Self::Local(format!("local-{:016x}", rand::random::<u64>()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Provider(id) | Self::Local(id) => id,
        }
    }

    /// The provider id, if this summary has one to look up by.
    pub fn provider_id(&self) -> Option<&str> {
        match self {
            Self::Provider(id) => Some(id),
            Self::Local(_) => None,
        }
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields only the detail view shows. Filled whenever the record that
/// produced the summary carried them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaExtras {
    pub rated: Option<String>,
    pub awards: Option<String>,
    pub box_office: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
}

/// The normalized view item every row, the banner and the detail view render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSummary {
    pub id: MediaId,
    pub title: String,
    /// Plot text, or [`PLACEHOLDER_OVERVIEW`] when the provider gave none.
    pub overview: String,
    /// Poster URL. Used for both poster and backdrop slots.
    pub image_ref: Option<String>,
    /// 0.0 when unknown.
    pub rating: f32,
    pub year: String,
    pub released: Option<String>,
    /// Comma-joined.
    pub genre: String,
    pub director: String,
    /// Comma-joined.
    pub cast: String,
    pub runtime: String,
    pub kind: Option<MediaKind>,
    pub extras: MediaExtras,
}

impl MediaSummary {
    pub fn display_title(&self) -> &str {
        &self.title
    }

    /// Whether the overview is real plot text rather than the placeholder.
    pub fn has_plot(&self) -> bool {
        self.overview != PLACEHOLDER_OVERVIEW
    }

    /// Overview cut to `max` characters, ending in `...` when shortened.
    pub fn truncated_overview(&self, max: usize) -> String {
        if self.overview.chars().count() > max {
            let head: String = self.overview.chars().take(max.saturating_sub(1)).collect();
            format!("{head}...")
        } else {
            self.overview.clone()
        }
    }

    /// `"8.3/10"`, or `None` when the rating is unknown.
    pub fn rating_label(&self) -> Option<String> {
        (self.rating > 0.0).then(|| format!("{}/10", self.rating))
    }
}
