use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::OmdbError;
use super::types::{decode_response, OmdbRecord, OmdbSearchResponse};
use crate::traits::{MediaKind, MetadataProvider, ProviderRecord, SearchPage};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb client. One endpoint, every request carries the API key.
pub struct OmdbClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OmdbClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http,
        }
    }

    /// The full query for one request: the key first, then `params`.
    fn authed(&self, params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push(("apikey", self.api_key.clone()));
        query.extend(params);
        query
    }

    /// Issue one GET with the given query shape and decode the envelope.
    async fn get<T: DeserializeOwned>(&self, params: Vec<(&'static str, String)>) -> Result<T, OmdbError> {
        tracing::debug!(?params, "OMDb request");

        let resp = self
            .http
            .get(&self.base_url)
            .query(&self.authed(params))
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "OMDb transport error"))?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;

        decode_response(status, &body)
            .inspect_err(|e| tracing::warn!(status, error = %e, "OMDb API error"))
    }
}

// ── Query shapes ────────────────────────────────────────────────

fn search_params(query: &str, kind: Option<MediaKind>, page: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![("s", query.to_string()), ("page", page.max(1).to_string())];
    if let Some(kind) = kind {
        params.push(("type", kind.as_str().to_string()));
    }
    params
}

fn id_params(id: &str) -> Vec<(&'static str, String)> {
    vec![("i", id.to_string()), ("plot", "full".to_string())]
}

fn title_params(title: &str, year: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![("t", title.to_string()), ("plot", "full".to_string())];
    if let Some(year) = year.map(str::trim).filter(|y| !y.is_empty()) {
        params.push(("y", year.to_string()));
    }
    params
}

impl MetadataProvider for OmdbClient {
    type Error = OmdbError;

    async fn search_by_title(
        &self,
        query: &str,
        kind: Option<MediaKind>,
        page: u32,
    ) -> Result<SearchPage, OmdbError> {
        let resp: OmdbSearchResponse = self.get(search_params(query, kind, page)).await?;
        Ok(resp.into_search_page())
    }

    async fn get_by_id(&self, id: &str) -> Result<ProviderRecord, OmdbError> {
        let record: OmdbRecord = self.get(id_params(id)).await?;
        Ok(record.into_provider_record())
    }

    async fn get_by_title(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<ProviderRecord, OmdbError> {
        let record: OmdbRecord = self.get(title_params(title, year)).await?;
        Ok(record.into_provider_record())
    }
}
