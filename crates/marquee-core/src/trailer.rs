use marquee_api::{TrailerLookup, TrailerQuery};
use serde::{Deserialize, Serialize};
use url::Url;

/// A resolved trailer video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerRef {
    video_id: String,
}

impl TrailerRef {
    /// Take the video id from a URL's `v` query parameter.
    pub fn from_url(url: &Url) -> Option<Self> {
        let (_, id) = url.query_pairs().find(|(k, _)| k == "v")?;
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self {
            video_id: id.into_owned(),
        })
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    /// Inline player URL: autoplay with controls, no related videos.
    pub fn embed_url(&self, muted: bool) -> String {
        format!(
            "https://www.youtube.com/embed/{}?autoplay=1&mute={}&controls=1&rel=0&modestbranding=1",
            self.video_id,
            u8::from(muted)
        )
    }
}

/// What the detail view's play button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerAction {
    Play(TrailerRef),
    /// Open an external video search instead.
    Search(Url),
}

/// External search page for `query`, built on the configured base URL.
pub fn search_url(base: &Url, query: &TrailerQuery) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("search_query", &query.to_string());
    url
}

/// Best-effort trailer resolution. Lookup errors and URLs without a video id
/// both come back as `None`.
pub async fn find_trailer<T: TrailerLookup>(lookup: &T, query: &TrailerQuery) -> Option<TrailerRef> {
    match lookup.find_trailer(query).await {
        Ok(Some(url)) => {
            let trailer = TrailerRef::from_url(&url);
            if trailer.is_none() {
                tracing::debug!(%url, "trailer URL has no video id");
            }
            trailer
        }
        Ok(None) => {
            tracing::debug!(%query, "no trailer found");
            None
        }
        Err(e) => {
            tracing::debug!(%query, error = %e, "trailer lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    struct FixedLookup(Option<&'static str>);

    impl TrailerLookup for FixedLookup {
        type Error = Infallible;

        async fn find_trailer(&self, _query: &TrailerQuery) -> Result<Option<Url>, Infallible> {
            Ok(self.0.map(|u| Url::parse(u).unwrap()))
        }
    }

    #[test]
    fn test_from_url_extracts_v() {
        let url = Url::parse("https://www.youtube.com/watch?feature=share&v=2GfZl4kuVNI").unwrap();
        let trailer = TrailerRef::from_url(&url).unwrap();
        assert_eq!(trailer.video_id(), "2GfZl4kuVNI");
        assert_eq!(trailer.watch_url(), "https://www.youtube.com/watch?v=2GfZl4kuVNI");
        assert!(trailer.embed_url(true).contains("mute=1"));
        assert!(trailer.embed_url(false).contains("/embed/2GfZl4kuVNI?autoplay=1&mute=0"));
    }

    #[test]
    fn test_from_url_without_v() {
        let url = Url::parse("https://youtu.be/2GfZl4kuVNI").unwrap();
        assert!(TrailerRef::from_url(&url).is_none());

        let url = Url::parse("https://www.youtube.com/watch?v=").unwrap();
        assert!(TrailerRef::from_url(&url).is_none());

        let url = Url::parse("https://www.youtube.com/watch?v=%3Cscript%3E").unwrap();
        assert!(TrailerRef::from_url(&url).is_none());
    }

    #[test]
    fn test_search_url() {
        let base = Url::parse("https://www.youtube.com/results").unwrap();
        let query = TrailerQuery::new("Heat", Some("1995".into()));
        assert_eq!(
            search_url(&base, &query).as_str(),
            "https://www.youtube.com/results?search_query=Heat+1995+trailer"
        );
    }

    #[tokio::test]
    async fn test_find_trailer() {
        let query = TrailerQuery::new("Heat", None);

        let found = find_trailer(&FixedLookup(Some("https://www.youtube.com/watch?v=abc")), &query).await;
        assert_eq!(found.map(|t| t.video_id().to_string()), Some("abc".into()));

        assert!(find_trailer(&FixedLookup(None), &query).await.is_none());
        assert!(find_trailer(&FixedLookup(Some("https://example.com/x")), &query)
            .await
            .is_none());
    }
}
