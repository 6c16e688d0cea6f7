//! The object a rendering layer holds: injected clients, the home catalog
//! and one controller per surface (rows, banner, detail view).
//!
//! Network work never runs under a state lock. Each fetch takes a ticket
//! from its controller, runs unlocked, then hands the result back with the
//! ticket so superseded results are dropped.

pub mod logging;
mod trailers;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use url::Url;

use marquee_api::omdb::OmdbClient;
use marquee_api::tmdb::{NoTrailers, TmdbTrailerClient};
use marquee_api::{MetadataProvider, TrailerLookup};
use marquee_core::banner::{pick_featured, BannerController, BannerState};
use marquee_core::catalog::{self, Category};
use marquee_core::config::AppConfig;
use marquee_core::detail::{fetch_enrichment, DetailController, DetailTicket};
use marquee_core::models::{DetailState, MediaSummary};
use marquee_core::resolver::resolve;
use marquee_core::row::{FetchTicket, RowController, RowState};
use marquee_core::trailer::{find_trailer, TrailerAction};

pub use trailers::TrailerService;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A snapshot of one row for rendering.
#[derive(Debug, Clone)]
pub struct RowView {
    pub category: Category,
    pub state: RowState,
}

pub struct Runtime<P, T> {
    provider: Arc<P>,
    trailers: Arc<T>,
    search_base: Url,
    rows: Arc<RwLock<Vec<RowController>>>,
    banner: Arc<RwLock<BannerController>>,
    detail: Arc<RwLock<DetailController>>,
    detail_tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Runtime<OmdbClient, TrailerService> {
    /// Build the production runtime from config: OMDb for metadata, TMDB for
    /// trailers when a key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, RuntimeError> {
        let api_key = config.provider.api_key().ok_or_else(|| {
            RuntimeError::Config(format!(
                "OMDb API key required (set provider.api_key or {})",
                marquee_core::config::API_KEY_ENV
            ))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider.timeout_secs))
            .build()?;
        let provider = OmdbClient::new(http.clone(), &config.provider.base_url, api_key);

        let trailers = match config.trailers.tmdb_api_key() {
            Some(key) => TrailerService::Tmdb(TmdbTrailerClient::new(
                http,
                &config.trailers.tmdb_base_url,
                key,
            )),
            None => {
                tracing::info!("trailer lookup disabled, detail view will offer search");
                TrailerService::Disabled(NoTrailers)
            }
        };

        let search_base = Url::parse(&config.trailers.search_url)
            .map_err(|e| RuntimeError::Config(format!("trailers.search_url: {e}")))?;

        let primary = banner_category(&config.banner.primary)?;
        let secondary = banner_category(&config.banner.secondary)?;

        Ok(Self::with_services(
            provider,
            trailers,
            catalog::home_rows(),
            (primary, secondary),
            search_base,
        ))
    }
}

fn banner_category(key: &str) -> Result<Category, RuntimeError> {
    catalog::find(key).ok_or_else(|| RuntimeError::Config(format!("unknown banner category: {key}")))
}

impl<P, T> Runtime<P, T>
where
    P: MetadataProvider + 'static,
    T: TrailerLookup + 'static,
{
    pub fn with_services(
        provider: P,
        trailers: T,
        rows: Vec<Category>,
        banner: (Category, Category),
        search_base: Url,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            trailers: Arc::new(trailers),
            search_base,
            rows: Arc::new(RwLock::new(rows.into_iter().map(RowController::new).collect())),
            banner: Arc::new(RwLock::new(BannerController::new(banner.0, banner.1))),
            detail: Arc::new(RwLock::new(DetailController::new())),
            detail_tasks: Mutex::new(Vec::new()),
        }
    }

    // ── Rows ────────────────────────────────────────────────────

    /// Load the banner and every row concurrently.
    pub async fn load_home(&self) {
        let count = self.rows.read().await.len();
        let rows = join_all((0..count).map(|i| self.load_row(i)));
        futures::join!(self.load_banner(), rows);
        tracing::info!(rows = count, "home screen loaded");
    }

    /// Start a new fetch cycle for one row and run it.
    pub async fn load_row(&self, index: usize) {
        let started = {
            let mut rows = self.rows.write().await;
            rows.get_mut(index).map(|row| row.begin())
        };
        if let Some(ticket) = started {
            self.fetch_row(index, ticket).await;
        }
    }

    /// Point a row at a different category. A new key refetches; results of
    /// the previous category that arrive later are dropped.
    pub async fn set_row_category(&self, index: usize, category: Category) {
        let started = {
            let mut rows = self.rows.write().await;
            rows.get_mut(index).and_then(|row| row.set_category(category))
        };
        if let Some(ticket) = started {
            self.fetch_row(index, ticket).await;
        }
    }

    async fn fetch_row(&self, index: usize, ticket: FetchTicket) {
        let source = {
            let rows = self.rows.read().await;
            match rows.get(index) {
                Some(row) if row.is_current(ticket) => row.category().source.clone(),
                _ => return,
            }
        };

        let outcome = resolve(&*self.provider, &source).await;

        if let Some(row) = self.rows.write().await.get_mut(index) {
            row.finish(ticket, outcome);
        }
    }

    pub async fn rows(&self) -> Vec<RowView> {
        self.rows
            .read()
            .await
            .iter()
            .map(|row| RowView {
                category: row.category().clone(),
                state: row.state().clone(),
            })
            .collect()
    }

    // ── Banner ──────────────────────────────────────────────────

    pub async fn load_banner(&self) {
        let (ticket, primary, secondary) = {
            let mut banner = self.banner.write().await;
            let ticket = banner.begin();
            let (p, s) = banner.categories();
            (ticket, p.clone(), s.clone())
        };

        let mut rng = StdRng::from_rng(&mut rand::rng());
        let featured = pick_featured(&*self.provider, &primary, &secondary, &mut rng).await;

        self.banner.write().await.finish(ticket, featured);
    }

    pub async fn banner(&self) -> BannerState {
        self.banner.read().await.state().clone()
    }

    // ── Detail view ─────────────────────────────────────────────

    /// Open the detail view for a row tile.
    pub async fn select_row_item(&self, row: usize, index: usize) -> Option<DetailTicket> {
        let summary = self.rows.read().await.get(row)?.select(index)?;
        Some(self.select(summary).await)
    }

    /// Open the detail view for the featured item.
    pub async fn select_banner(&self) -> Option<DetailTicket> {
        let summary = self.banner.read().await.select()?;
        Some(self.select(summary).await)
    }

    /// Show `summary` now and start the enrichment and trailer lookups as
    /// two independent tasks. Lookups for a previous selection are aborted.
    pub async fn select(&self, summary: MediaSummary) -> DetailTicket {
        self.abort_detail_tasks();

        let (ticket, enrich_id, query) = {
            let mut detail = self.detail.write().await;
            let ticket = detail.open(summary);
            let state = detail.state().map(|s| (s.enrichment_id().map(str::to_string), s.trailer_query()));
            match state {
                Some((id, query)) => (ticket, id, query),
                None => return ticket,
            }
        };

        let mut tasks = Vec::with_capacity(2);

        if let Some(id) = enrich_id {
            let provider = Arc::clone(&self.provider);
            let detail = Arc::clone(&self.detail);
            tasks.push(tokio::spawn(async move {
                let record = fetch_enrichment(&*provider, &id).await;
                detail.write().await.apply_enrichment(ticket, record);
            }));
        }

        let trailers = Arc::clone(&self.trailers);
        let detail = Arc::clone(&self.detail);
        tasks.push(tokio::spawn(async move {
            let trailer = find_trailer(&*trailers, &query).await;
            detail.write().await.apply_trailer(ticket, trailer);
        }));

        self.lock_tasks().extend(tasks);
        ticket
    }

    pub async fn close_detail(&self) {
        self.abort_detail_tasks();
        self.detail.write().await.close();
    }

    pub async fn detail(&self) -> Option<DetailState> {
        self.detail.read().await.state().cloned()
    }

    /// Wait for the current selection's lookups to finish.
    pub async fn settle_detail(&self) {
        let tasks = std::mem::take(&mut *self.lock_tasks());
        for result in join_all(tasks).await {
            if let Err(e) = result {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "detail lookup task failed");
                }
            }
        }
    }

    pub async fn trailer_action(&self) -> Option<TrailerAction> {
        self.detail
            .read()
            .await
            .state()
            .map(|s| s.trailer_action(&self.search_base))
    }

    /// Open the external trailer search in the system browser. Returns
    /// `false` when an inline trailer is available instead.
    pub async fn open_trailer_search(&self) -> Result<bool, RuntimeError> {
        match self.trailer_action().await {
            Some(TrailerAction::Search(url)) => {
                open::that(url.as_str())?;
                Ok(true)
            }
            Some(TrailerAction::Play(_)) | None => Ok(false),
        }
    }

    fn abort_detail_tasks(&self) {
        for task in self.lock_tasks().drain(..) {
            task.abort();
        }
    }

    fn lock_tasks(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.detail_tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
