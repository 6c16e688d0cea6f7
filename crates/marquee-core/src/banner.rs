//! Featured banner selection.

use marquee_api::{MediaKind, MetadataProvider, ProviderRecord};
use rand::Rng;

use crate::catalog::Category;
use crate::models::{MediaExtras, MediaId, MediaSummary};
use crate::normalize::summarize;
use crate::resolver::resolve;

/// Banner overview length before truncation.
pub const OVERVIEW_LIMIT: usize = 150;

#[derive(Debug, Clone, PartialEq)]
pub enum BannerState {
    Loading,
    Featured(MediaSummary),
}

/// The item featured when neither category yields anything.
pub fn fallback_feature() -> MediaSummary {
    MediaSummary {
        id: MediaId::Provider("tt0111161".into()),
        title: "The Shawshank Redemption".into(),
        overview: "Two imprisoned men bond over a number of years, finding solace and eventual \
                   redemption through acts of common decency."
            .into(),
        image_ref: Some(
            "https://m.media-amazon.com/images/M/MV5BMDFkYTc0MGEtZmNhMC00ZDIzLWFmNTEtODM1ZmRlYWMwMWFmXkEyXkFqcGdeQXVyMTMxODk2OTU@._V1_SX300.jpg"
                .into(),
        ),
        rating: 9.3,
        year: "1994".into(),
        released: Some("1994-09-23".into()),
        genre: "Drama".into(),
        director: "Frank Darabont".into(),
        cast: "Tim Robbins, Morgan Freeman, Bob Gunton".into(),
        runtime: "142 min".into(),
        kind: Some(MediaKind::Movie),
        extras: MediaExtras {
            rated: Some("R".into()),
            awards: None,
            box_office: None,
            country: Some("United States".into()),
            language: Some("English".into()),
        },
    }
}

/// Pick the featured item: a uniform draw from `primary`, else from
/// `secondary`, else [`fallback_feature`]. A category that fails to resolve
/// counts as empty.
pub async fn pick_featured<P, R>(
    provider: &P,
    primary: &Category,
    secondary: &Category,
    rng: &mut R,
) -> MediaSummary
where
    P: MetadataProvider,
    R: Rng + ?Sized,
{
    for category in [primary, secondary] {
        match resolve(provider, &category.source).await {
            Ok(records) if !records.is_empty() => {
                tracing::debug!(category = %category.key, candidates = records.len(), "drawing banner item");
                return draw(records, rng);
            }
            Ok(_) => tracing::debug!(category = %category.key, "banner category empty"),
            Err(e) => tracing::warn!(category = %category.key, error = %e, "banner category failed"),
        }
    }

    tracing::info!("using built-in banner item");
    fallback_feature()
}

/// Uniform draw from a non-empty list.
fn draw<R: Rng + ?Sized>(mut records: Vec<ProviderRecord>, rng: &mut R) -> MediaSummary {
    let index = rng.random_range(0..records.len());
    summarize(records.swap_remove(index))
}

/// Owns the banner's state and guards it against superseded loads.
#[derive(Debug)]
pub struct BannerController {
    primary: Category,
    secondary: Category,
    state: BannerState,
    latest: u64,
}

/// Identifies one banner load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTicket(u64);

impl BannerController {
    pub fn new(primary: Category, secondary: Category) -> Self {
        Self {
            primary,
            secondary,
            state: BannerState::Loading,
            latest: 0,
        }
    }

    pub fn state(&self) -> &BannerState {
        &self.state
    }

    pub fn categories(&self) -> (&Category, &Category) {
        (&self.primary, &self.secondary)
    }

    pub fn begin(&mut self) -> BannerTicket {
        self.latest += 1;
        self.state = BannerState::Loading;
        BannerTicket(self.latest)
    }

    pub fn finish(&mut self, ticket: BannerTicket, featured: MediaSummary) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        self.state = BannerState::Featured(featured);
        true
    }

    /// Run one whole load in place.
    pub async fn load<P, R>(&mut self, provider: &P, rng: &mut R) -> &BannerState
    where
        P: MetadataProvider,
        R: Rng + ?Sized,
    {
        let ticket = self.begin();
        let featured = pick_featured(provider, &self.primary, &self.secondary, rng).await;
        self.finish(ticket, featured);
        &self.state
    }

    /// Banner blurb, cut to [`OVERVIEW_LIMIT`].
    pub fn overview(&self) -> Option<String> {
        match &self.state {
            BannerState::Featured(item) => Some(item.truncated_overview(OVERVIEW_LIMIT)),
            BannerState::Loading => None,
        }
    }

    /// The featured item, forwarded to the detail flow on click.
    pub fn select(&self) -> Option<MediaSummary> {
        match &self.state {
            BannerState::Featured(item) => Some(item.clone()),
            BannerState::Loading => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::Category;
    use crate::testing::{record, FakeError, FakeProvider};

    fn categories() -> (Category, Category) {
        (
            Category::titles("primary", "Primary", &["P1", "P2", "P3"]),
            Category::titles("secondary", "Secondary", &["S1"]),
        )
    }

    #[tokio::test]
    async fn test_draw_from_primary() {
        let (primary, secondary) = categories();
        let fake = FakeProvider::with_titles(&["P1", "P2", "P3", "S1"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let featured = pick_featured(&fake, &primary, &secondary, &mut rng).await;
            assert!(["P1", "P2", "P3"].contains(&featured.title.as_str()));
        }
    }

    #[tokio::test]
    async fn test_empty_primary_falls_to_secondary() {
        let (primary, secondary) = categories();
        let fake = FakeProvider::with_titles(&["S1"]);
        let mut rng = StdRng::seed_from_u64(1);

        let featured = pick_featured(&fake, &primary, &secondary, &mut rng).await;
        assert_eq!(featured.title, "S1");
    }

    #[tokio::test]
    async fn test_failed_listing_falls_to_secondary() {
        let primary = Category::search("anything", None);
        let (_, secondary) = categories();
        let fake = FakeProvider::with_titles(&["S1"]).search(Err(FakeError::Down));
        let mut rng = StdRng::seed_from_u64(1);

        let featured = pick_featured(&fake, &primary, &secondary, &mut rng).await;
        assert_eq!(featured.title, "S1");
    }

    #[tokio::test]
    async fn test_both_empty_uses_fallback_exactly() {
        let (primary, secondary) = categories();
        let fake = FakeProvider::new().title("S1", Err(FakeError::Down));
        let mut rng = StdRng::seed_from_u64(1);

        let featured = pick_featured(&fake, &primary, &secondary, &mut rng).await;
        assert_eq!(featured, fallback_feature());
        assert_eq!(featured.id, MediaId::Provider("tt0111161".into()));
        assert_eq!(featured.title, "The Shawshank Redemption");
    }

    #[test]
    fn test_draw_covers_every_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let records = vec![record("A"), record("B"), record("C")];
            seen.insert(draw(records, &mut rng).title);
        }
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn test_controller_select_after_load() {
        let (primary, secondary) = categories();
        let fake = FakeProvider::new();
        let mut banner = BannerController::new(primary, secondary);
        assert!(banner.select().is_none());

        banner.load(&fake, &mut StdRng::seed_from_u64(3)).await;
        assert_eq!(banner.select(), Some(fallback_feature()));
        assert!(banner.overview().unwrap().starts_with("Two imprisoned men"));
    }

    #[test]
    fn test_controller_discards_superseded_load() {
        let (primary, secondary) = categories();
        let mut banner = BannerController::new(primary, secondary);
        let first = banner.begin();
        let second = banner.begin();

        assert!(!banner.finish(first, fallback_feature()));
        assert_eq!(*banner.state(), BannerState::Loading);
        assert!(banner.finish(second, fallback_feature()));
    }
}
