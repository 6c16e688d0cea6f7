//! Per-row fetch state machine.

use marquee_api::{MetadataProvider, ProviderRecord};

use crate::catalog::Category;
use crate::error::CoreError;
use crate::models::MediaSummary;
use crate::normalize::summarize;
use crate::resolver::resolve;

pub const ERROR_MESSAGE: &str = "Failed to load movies";
pub const EMPTY_MESSAGE: &str = "No movies found in this category";

/// What a row shows.
#[derive(Debug, Clone, PartialEq)]
pub enum RowState {
    Loading,
    Error(String),
    Empty,
    Ready(Vec<MediaSummary>),
}

impl RowState {
    /// Text shown instead of tiles, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            Self::Empty => Some(EMPTY_MESSAGE),
            Self::Loading | Self::Ready(_) => None,
        }
    }

    pub fn items(&self) -> &[MediaSummary] {
        match self {
            Self::Ready(items) => items,
            _ => &[],
        }
    }
}

/// Identifies one fetch cycle. Only the most recent ticket may finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Owns one row's state. Every fetch cycle starts with [`begin`] and ends
/// with [`finish`]; results for superseded tickets are dropped.
///
/// [`begin`]: RowController::begin
/// [`finish`]: RowController::finish
#[derive(Debug)]
pub struct RowController {
    category: Category,
    state: RowState,
    latest: u64,
}

impl RowController {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            state: RowState::Loading,
            latest: 0,
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn state(&self) -> &RowState {
        &self.state
    }

    /// Start a fetch cycle: state goes back to `Loading` and any cycle in
    /// flight becomes stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        self.state = RowState::Loading;
        FetchTicket(self.latest)
    }

    /// Swap the category. A different key starts a new cycle; the same key
    /// keeps the current one.
    pub fn set_category(&mut self, category: Category) -> Option<FetchTicket> {
        if category.key == self.category.key {
            self.category = category;
            return None;
        }
        self.category = category;
        Some(self.begin())
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply a resolver outcome. Returns `false` and leaves state untouched
    /// when `ticket` has been superseded.
    pub fn finish(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<ProviderRecord>, CoreError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(row = %self.category.key, "discarding stale row result");
            return false;
        }

        self.state = match outcome {
            Err(e) => {
                tracing::warn!(row = %self.category.key, error = %e, "row fetch failed");
                RowState::Error(ERROR_MESSAGE.to_string())
            }
            Ok(records) if records.is_empty() => RowState::Empty,
            Ok(records) => RowState::Ready(records.into_iter().map(summarize).collect()),
        };
        true
    }

    /// Run one whole cycle in place.
    pub async fn load<P: MetadataProvider>(&mut self, provider: &P) -> &RowState {
        let ticket = self.begin();
        let outcome = resolve(provider, &self.category.source).await;
        self.finish(ticket, outcome);
        &self.state
    }

    /// The summary behind a clicked tile.
    pub fn select(&self, index: usize) -> Option<MediaSummary> {
        self.state.items().get(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use marquee_api::FailureKind;

    use super::*;
    use crate::catalog::{home_rows, Category};
    use crate::testing::{record, FakeError, FakeProvider};

    fn action_movies() -> Category {
        home_rows()
            .into_iter()
            .find(|c| c.title == "Action Movies")
            .unwrap()
    }

    #[tokio::test]
    async fn test_action_movies_ready_in_canonical_order() {
        let titles = ["Mission Impossible", "John Wick", "Mad Max", "Die Hard", "Terminator"];
        let fake = FakeProvider::with_titles(&titles);
        let mut row = RowController::new(action_movies());

        let state = row.load(&fake).await;
        let got: Vec<&str> = state.items().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(got, titles);
        assert!(matches!(state, RowState::Ready(items) if items.len() == 5));
    }

    #[tokio::test]
    async fn test_nothing_resolves_is_empty_not_error() {
        let fake = FakeProvider::new();
        let mut row = RowController::new(action_movies());

        assert_eq!(*row.load(&fake).await, RowState::Empty);
        assert_eq!(row.state().message(), Some(EMPTY_MESSAGE));
    }

    #[tokio::test]
    async fn test_listing_failure_is_error() {
        let fake = FakeProvider::new().search(Err(FakeError::Down));
        let mut row = RowController::new(Category::search("heat", None));

        assert_eq!(
            *row.load(&fake).await,
            RowState::Error(ERROR_MESSAGE.to_string())
        );
        assert_eq!(row.state().message(), Some(ERROR_MESSAGE));
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut row = RowController::new(action_movies());
        let first = row.begin();
        let second = row
            .set_category(Category::titles("other", "Other", &["Heat"]))
            .unwrap();

        assert!(!row.finish(first, Ok(vec![record("Stale")])));
        assert_eq!(*row.state(), RowState::Loading);

        assert!(row.finish(second, Ok(vec![record("Heat")])));
        assert_eq!(row.state().items()[0].title, "Heat");

        // A late first result still cannot land after the second finished.
        assert!(!row.finish(first, Ok(vec![record("Stale")])));
        assert_eq!(row.state().items()[0].title, "Heat");
    }

    #[test]
    fn test_same_key_keeps_cycle() {
        let mut row = RowController::new(action_movies());
        let ticket = row.begin();
        assert!(row.set_category(action_movies()).is_none());
        assert!(row.is_current(ticket));
    }

    #[test]
    fn test_ready_keeps_resolver_order_and_normalizes() {
        let mut row = RowController::new(action_movies());
        let ticket = row.begin();
        row.finish(ticket, Ok(vec![record("Zulu"), record("Alpha")]));

        let items = row.state().items();
        assert_eq!(items[0].title, "Zulu");
        assert_eq!(items[1].title, "Alpha");
        assert!(items[0].image_ref.is_none());
        assert_eq!(row.select(1).map(|s| s.title), Some("Alpha".into()));
        assert!(row.select(2).is_none());
    }

    #[test]
    fn test_error_outcome() {
        let mut row = RowController::new(action_movies());
        let ticket = row.begin();
        row.finish(
            ticket,
            Err(CoreError::Provider {
                kind: FailureKind::Provider,
                message: "Invalid API key!".into(),
            }),
        );
        assert_eq!(*row.state(), RowState::Error(ERROR_MESSAGE.to_string()));
    }
}
