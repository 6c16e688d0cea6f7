use serde::Deserialize;

// ── Multi search ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbSearchHit {
    pub id: u64,
    pub media_type: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
}

impl TmdbSearchHit {
    /// Path segment for the hit's videos endpoint. People have no videos.
    pub fn video_path(&self) -> Option<String> {
        match self.media_type.as_deref() {
            Some("movie") => Some(format!("/movie/{}/videos", self.id)),
            Some("tv") => Some(format!("/tv/{}/videos", self.id)),
            _ => None,
        }
    }

    /// `year` may be a range like `"2008–2013"`; only its start is compared.
    fn matches_year(&self, year: &str) -> bool {
        let year = year.trim().get(..4).unwrap_or(year);
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .is_some_and(|d| d.starts_with(year))
    }
}

/// Pick the hit to fetch videos for: the first movie/tv hit from the
/// requested year, else the first movie/tv hit at all.
pub fn best_hit<'a>(hits: &'a [TmdbSearchHit], year: Option<&str>) -> Option<&'a TmdbSearchHit> {
    let candidates = || hits.iter().filter(|h| h.video_path().is_some());
    year.and_then(|y| candidates().find(|h| h.matches_year(y)))
        .or_else(|| candidates().next())
}

// ── Videos ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TmdbVideosResponse {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub type_: String,
}

/// YouTube trailers first, then any YouTube video.
pub fn best_video_key(videos: &[TmdbVideo]) -> Option<&str> {
    let youtube = || videos.iter().filter(|v| v.site.eq_ignore_ascii_case("youtube"));
    youtube()
        .find(|v| v.type_.eq_ignore_ascii_case("trailer"))
        .or_else(|| youtube().next())
        .map(|v| v.key.as_str())
}
