use marquee_api::tmdb::{NoTrailers, TmdbError, TmdbTrailerClient};
use marquee_api::{TrailerLookup, TrailerQuery};
use url::Url;

/// The configured trailer backend.
pub enum TrailerService {
    Tmdb(TmdbTrailerClient),
    Disabled(NoTrailers),
}

impl TrailerLookup for TrailerService {
    type Error = TmdbError;

    async fn find_trailer(&self, query: &TrailerQuery) -> Result<Option<Url>, TmdbError> {
        match self {
            Self::Tmdb(client) => client.find_trailer(query).await,
            Self::Disabled(none) => none.find_trailer(query).await.map_err(|never| match never {}),
        }
    }
}
