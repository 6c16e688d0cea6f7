//! Detail overlay controller.
//!
//! Selecting an item opens a [`DetailState`] tagged with a fresh
//! [`DetailTicket`]. The by-id enrichment and the trailer lookup run
//! independently and report back with that ticket; a result whose ticket is
//! no longer current (the view closed or another item was selected) is
//! dropped.

use marquee_api::{MetadataProvider, ProviderRecord, TrailerLookup};

use crate::models::{DetailState, MediaSummary};
use crate::trailer::TrailerRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket(u64);

#[derive(Debug, Default)]
pub struct DetailController {
    latest: u64,
    current: Option<(DetailTicket, DetailState)>,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `summary` immediately; the returned ticket tags its lookups.
    pub fn open(&mut self, summary: MediaSummary) -> DetailTicket {
        self.latest += 1;
        let ticket = DetailTicket(self.latest);
        tracing::debug!(id = %summary.id, title = %summary.title, "opening detail view");
        self.current = Some((ticket, DetailState::new(summary)));
        ticket
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn state(&self) -> Option<&DetailState> {
        self.current.as_ref().map(|(_, state)| state)
    }

    pub fn is_current(&self, ticket: DetailTicket) -> bool {
        matches!(&self.current, Some((t, _)) if *t == ticket)
    }

    fn subject_mut(&mut self, ticket: DetailTicket) -> Option<&mut DetailState> {
        match &mut self.current {
            Some((t, state)) if *t == ticket => Some(state),
            _ => {
                tracing::debug!("discarding stale detail result");
                None
            }
        }
    }

    /// Apply the by-id outcome. `None` means the lookup failed and the
    /// summary stays as it was. Returns whether anything was applied.
    pub fn apply_enrichment(&mut self, ticket: DetailTicket, record: Option<ProviderRecord>) -> bool {
        let Some(state) = self.subject_mut(ticket) else {
            return false;
        };
        match record {
            Some(record) => state.apply_enrichment(record),
            None => state.mark_enrichment_failed(),
        }
        true
    }

    pub fn apply_trailer(&mut self, ticket: DetailTicket, trailer: Option<TrailerRef>) -> bool {
        let Some(state) = self.subject_mut(ticket) else {
            return false;
        };
        state.apply_trailer(trailer);
        true
    }

    /// Run both lookups for the open subject and apply them in place.
    pub async fn settle<P, T>(&mut self, provider: &P, trailers: &T)
    where
        P: MetadataProvider,
        T: TrailerLookup,
    {
        let Some((ticket, state)) = &self.current else {
            return;
        };
        let ticket = *ticket;
        let id = state.enrichment_id().map(str::to_string);
        let query = state.trailer_query();

        let enrich = async {
            match id {
                Some(id) => Some(fetch_enrichment(provider, &id).await),
                None => None,
            }
        };
        let (record, trailer) =
            futures::join!(enrich, crate::trailer::find_trailer(trailers, &query));

        if let Some(record) = record {
            self.apply_enrichment(ticket, record);
        }
        self.apply_trailer(ticket, trailer);
    }
}

/// Best-effort by-id lookup. Failures are logged and come back as `None`.
pub async fn fetch_enrichment<P: MetadataProvider>(provider: &P, id: &str) -> Option<ProviderRecord> {
    match provider.get_by_id(id).await {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::info!(id, error = %e, "could not fetch additional details, using existing data");
            None
        }
    }
}
