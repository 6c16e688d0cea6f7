use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::OmdbError;
use crate::traits::{ProviderRecord, SearchPage};

// ── Envelope ────────────────────────────────────────────────────

/// Fields present on every OMDb response, success or not.
#[derive(Debug, Deserialize)]
pub struct OmdbEnvelope {
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbEnvelope {
    pub fn is_failure(&self) -> bool {
        self.response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"))
    }
}

// ── Title / id lookups and search ───────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OmdbRecord {
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Rated")]
    pub rated: Option<String>,
    #[serde(rename = "Released")]
    pub released: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Writer")]
    pub writer: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Awards")]
    pub awards: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "BoxOffice")]
    pub box_office: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbRecord>,
}

// ── Decoding ────────────────────────────────────────────────────

/// Decode an OMDb response body.
///
/// A `"Response": "False"` envelope is a failure whatever the HTTP status.
/// Non-2xx statuses without such an envelope become [`OmdbError::Api`].
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, OmdbError> {
    if let Ok(envelope) = serde_json::from_str::<OmdbEnvelope>(body) {
        if envelope.is_failure() {
            let message = envelope
                .error
                .unwrap_or_else(|| "API request failed".to_string());
            return Err(classify_failure(message));
        }
    }

    if !(200..300).contains(&status) {
        return Err(OmdbError::Api {
            status,
            message: body.to_string(),
        });
    }

    serde_json::from_str(body).map_err(|e| OmdbError::Parse(e.to_string()))
}

/// Split provider failure messages into "matched nothing" and everything else.
pub fn classify_failure(message: String) -> OmdbError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("not found") || lower.contains("incorrect imdb id") {
        OmdbError::NotFound(message)
    } else {
        OmdbError::Provider(message)
    }
}

// ── Conversions to shared trait types ───────────────────────────

impl OmdbRecord {
    pub fn into_provider_record(self) -> ProviderRecord {
        ProviderRecord {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            rated: self.rated,
            released: self.released,
            runtime: self.runtime,
            genre: self.genre,
            director: self.director,
            writer: self.writer,
            actors: self.actors,
            plot: self.plot,
            language: self.language,
            country: self.country,
            awards: self.awards,
            poster: self.poster,
            rating: self.imdb_rating,
            kind: self.kind,
            box_office: self.box_office,
        }
    }
}

impl OmdbSearchResponse {
    pub fn into_search_page(self) -> SearchPage {
        SearchPage {
            items: self
                .search
                .into_iter()
                .map(OmdbRecord::into_provider_record)
                .collect(),
        }
    }
}
