//! Trait definitions for metadata and trailer services.
//!
//! Service clients (OMDb, TMDB) implement these traits so the controllers in
//! `marquee-core` never depend on a concrete provider. Tests substitute
//! in-memory fakes.

use std::future::Future;

use url::Url;

/// How a provider call failed, independent of the concrete client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network, DNS or timeout failure before a response arrived.
    Transport,
    /// The provider answered but signalled an application-level failure.
    Provider,
    /// The lookup matched nothing.
    NotFound,
}

/// Errors that can report which [`FailureKind`] they belong to.
pub trait ProviderFailure: std::error::Error + Send + Sync + 'static {
    fn kind(&self) -> FailureKind;
}

/// A movie/show metadata service.
pub trait MetadataProvider: Send + Sync {
    type Error: ProviderFailure;

    /// Search by title, optionally restricted to one kind. `page` is 1-based.
    fn search_by_title(
        &self,
        query: &str,
        kind: Option<MediaKind>,
        page: u32,
    ) -> impl Future<Output = Result<SearchPage, Self::Error>> + Send;

    /// Fetch one record by provider id, with the full plot.
    fn get_by_id(&self, id: &str) -> impl Future<Output = Result<ProviderRecord, Self::Error>> + Send;

    /// Fetch the best title match, optionally constrained to a release year.
    fn get_by_title(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> impl Future<Output = Result<ProviderRecord, Self::Error>> + Send;
}

/// A trailer search facility keyed by title and year.
pub trait TrailerLookup: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve a playable trailer URL, or `None` when nothing matched.
    fn find_trailer(
        &self,
        query: &TrailerQuery,
    ) -> impl Future<Output = Result<Option<Url>, Self::Error>> + Send;
}

/// Movie or series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Value of the provider's `type` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    /// Parse a provider type string. Episodes and games have no kind here.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "Movie"),
            Self::Series => write!(f, "Series"),
        }
    }
}

/// A raw record as returned by a metadata provider.
///
/// Every field is optional: search results carry only a handful of them,
/// by-id and by-title lookups carry most. Values are passed through as the
/// provider sent them, sentinels included.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProviderRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster: Option<String>,
    pub rating: Option<String>,
    pub kind: Option<String>,
    pub box_office: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub items: Vec<ProviderRecord>,
}

/// Title and year used to look up a trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerQuery {
    pub title: String,
    pub year: Option<String>,
}

impl TrailerQuery {
    pub fn new(title: impl Into<String>, year: Option<String>) -> Self {
        Self {
            title: title.into(),
            year: year.filter(|y| !y.trim().is_empty()),
        }
    }
}

/// Renders as `"<title> <year> trailer"`, the free-text form used for
/// external video search.
impl std::fmt::Display for TrailerQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.year {
            Some(year) => write!(f, "{} {} trailer", self.title, year),
            None => write!(f, "{} trailer", self.title),
        }
    }
}
