use marquee_api::{ProviderRecord, TrailerQuery};
use url::Url;

use super::media::MediaSummary;
use crate::normalize::{parse_rating, present};
use crate::trailer::{search_url, TrailerAction, TrailerRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentStatus {
    Pending,
    Applied,
    /// No provider id, or the plot was already known.
    Skipped,
    /// Lookup failed; the summary is shown as-is.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerStatus {
    Pending,
    Found(TrailerRef),
    Unavailable,
}

/// Everything the detail view shows for one selection. Starts with the
/// clicked summary, extras included, and is upgraded in place as lookups
/// land.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub summary: MediaSummary,
    pub plot: Option<String>,
    pub enrichment: EnrichmentStatus,
    pub trailer: TrailerStatus,
}

impl DetailState {
    pub fn new(summary: MediaSummary) -> Self {
        let enrichment = if summary.id.provider_id().is_some() && !summary.has_plot() {
            EnrichmentStatus::Pending
        } else {
            EnrichmentStatus::Skipped
        };
        Self {
            summary,
            plot: None,
            enrichment,
            trailer: TrailerStatus::Pending,
        }
    }

    /// Provider id to enrich from, if enrichment is still wanted.
    pub fn enrichment_id(&self) -> Option<&str> {
        match self.enrichment {
            EnrichmentStatus::Pending => self.summary.id.provider_id(),
            _ => None,
        }
    }

    pub fn trailer_query(&self) -> TrailerQuery {
        TrailerQuery::new(self.summary.title.clone(), Some(self.summary.year.clone()))
    }

    /// Merge a full record over the summary. Enrichment values win where
    /// present; the existing overview stays when the record has no plot.
    pub fn apply_enrichment(&mut self, record: ProviderRecord) {
        let s = &mut self.summary;
        if let Some(plot) = present(record.plot) {
            s.overview = plot.clone();
            self.plot = Some(plot);
        }
        merge(&mut s.genre, record.genre);
        merge(&mut s.director, record.director);
        merge(&mut s.cast, record.actors);
        merge(&mut s.runtime, record.runtime);
        let rating = parse_rating(record.rating.as_deref());
        if rating > 0.0 {
            s.rating = rating;
        }
        if s.image_ref.is_none() {
            s.image_ref = present(record.poster);
        }

        let extras = &mut s.extras;
        merge_opt(&mut extras.rated, record.rated);
        merge_opt(&mut extras.awards, record.awards);
        merge_opt(&mut extras.box_office, record.box_office);
        merge_opt(&mut extras.country, record.country);
        merge_opt(&mut extras.language, record.language);
        self.enrichment = EnrichmentStatus::Applied;
    }

    pub fn mark_enrichment_failed(&mut self) {
        self.enrichment = EnrichmentStatus::Failed;
    }

    pub fn apply_trailer(&mut self, trailer: Option<TrailerRef>) {
        self.trailer = match trailer {
            Some(t) => TrailerStatus::Found(t),
            None => TrailerStatus::Unavailable,
        };
    }

    /// The overview to render now.
    pub fn overview(&self) -> &str {
        &self.summary.overview
    }

    /// True while either lookup is still outstanding. Rendering never waits
    /// on this; it only drives spinners.
    pub fn is_settling(&self) -> bool {
        self.enrichment == EnrichmentStatus::Pending || self.trailer == TrailerStatus::Pending
    }

    /// Play inline when a trailer is known, else search externally.
    pub fn trailer_action(&self, search_base: &Url) -> TrailerAction {
        match &self.trailer {
            TrailerStatus::Found(t) => TrailerAction::Play(t.clone()),
            TrailerStatus::Pending | TrailerStatus::Unavailable => {
                TrailerAction::Search(search_url(search_base, &self.trailer_query()))
            }
        }
    }
}

fn merge(field: &mut String, value: Option<String>) {
    if let Some(v) = present(value) {
        *field = v;
    }
}

fn merge_opt(field: &mut Option<String>, value: Option<String>) {
    if let Some(v) = present(value) {
        *field = Some(v);
    }
}
