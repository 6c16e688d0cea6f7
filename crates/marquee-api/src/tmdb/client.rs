use std::convert::Infallible;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::TmdbError;
use super::types::{best_hit, best_video_key, TmdbSearchResponse, TmdbVideosResponse};
use crate::traits::{TrailerLookup, TrailerQuery};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// Resolves trailers through TMDB's video listings.
pub struct TmdbTrailerClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl TmdbTrailerClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let resp = self
            .http
            .get(format!("{}{path}", self.base_url.trim_end_matches('/')))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path, "TMDB API error");
            return Err(TmdbError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        serde_json::from_str(&body).map_err(|e| TmdbError::Parse(e.to_string()))
    }
}

impl TrailerLookup for TmdbTrailerClient {
    type Error = TmdbError;

    async fn find_trailer(&self, query: &TrailerQuery) -> Result<Option<Url>, TmdbError> {
        tracing::debug!(%query, "TMDB trailer lookup");

        let search: TmdbSearchResponse = self
            .get("/search/multi", &[("query", query.title.as_str())])
            .await?;
        let Some(path) = best_hit(&search.results, query.year.as_deref()).and_then(|h| h.video_path())
        else {
            return Ok(None);
        };

        let videos: TmdbVideosResponse = self.get(&path, &[]).await?;
        let Some(key) = best_video_key(&videos.results) else {
            return Ok(None);
        };

        Url::parse_with_params(WATCH_URL, &[("v", key)])
            .map(Some)
            .map_err(|e| TmdbError::Parse(e.to_string()))
    }
}

/// Trailer lookup that never finds anything. Used when no trailer service is
/// configured, so the UI always offers the search action.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrailers;

impl TrailerLookup for NoTrailers {
    type Error = Infallible;

    async fn find_trailer(&self, _query: &TrailerQuery) -> Result<Option<Url>, Infallible> {
        Ok(None)
    }
}
