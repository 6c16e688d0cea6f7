//! In-memory provider fakes shared by the controller tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use marquee_api::{
    FailureKind, MediaKind, MetadataProvider, ProviderFailure, ProviderRecord, SearchPage,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FakeError {
    #[error("no match")]
    NotFound,
    #[error("provider down")]
    Down,
}

impl ProviderFailure for FakeError {
    fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound => FailureKind::NotFound,
            Self::Down => FailureKind::Transport,
        }
    }
}

/// A record with id, title and year derived from the title.
pub fn record(title: &str) -> ProviderRecord {
    ProviderRecord {
        id: Some(format!("tt-{}", title.to_lowercase().replace(' ', "-"))),
        title: Some(title.to_string()),
        year: Some("2000".into()),
        poster: Some("N/A".into()),
        rating: Some("7.0".into()),
        kind: Some("movie".into()),
        ..Default::default()
    }
}

#[derive(Default)]
pub struct FakeProvider {
    titles: HashMap<String, (Duration, Result<ProviderRecord, FakeError>)>,
    ids: HashMap<String, Result<ProviderRecord, FakeError>>,
    search: Option<Result<Vec<ProviderRecord>, FakeError>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every title resolves immediately.
    pub fn with_titles(titles: &[&str]) -> Self {
        let mut fake = Self::new();
        for t in titles {
            fake = fake.title(t, Ok(record(t)));
        }
        fake
    }

    pub fn title(self, title: &str, result: Result<ProviderRecord, FakeError>) -> Self {
        self.delayed_title(title, Duration::ZERO, result)
    }

    pub fn delayed_title(
        mut self,
        title: &str,
        delay: Duration,
        result: Result<ProviderRecord, FakeError>,
    ) -> Self {
        self.titles.insert(title.to_string(), (delay, result));
        self
    }

    pub fn id(mut self, id: &str, result: Result<ProviderRecord, FakeError>) -> Self {
        self.ids.insert(id.to_string(), result);
        self
    }

    pub fn search(mut self, result: Result<Vec<ProviderRecord>, FakeError>) -> Self {
        self.search = Some(result);
        self
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MetadataProvider for FakeProvider {
    type Error = FakeError;

    async fn search_by_title(
        &self,
        query: &str,
        _kind: Option<MediaKind>,
        _page: u32,
    ) -> Result<SearchPage, FakeError> {
        self.log(format!("search:{query}"));
        let items = self.search.clone().unwrap_or(Err(FakeError::NotFound))?;
        Ok(SearchPage { items })
    }

    async fn get_by_id(&self, id: &str) -> Result<ProviderRecord, FakeError> {
        self.log(format!("id:{id}"));
        self.ids.get(id).cloned().unwrap_or(Err(FakeError::NotFound))
    }

    async fn get_by_title(
        &self,
        title: &str,
        _year: Option<&str>,
    ) -> Result<ProviderRecord, FakeError> {
        self.log(format!("title:{title}"));
        match self.titles.get(title) {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                result.clone()
            }
            None => Err(FakeError::NotFound),
        }
    }
}
