//! Category → raw provider records.

use futures::future::join_all;
use marquee_api::{FailureKind, MetadataProvider, ProviderFailure, ProviderRecord};

use crate::catalog::{genre_titles, CategorySource};
use crate::error::CoreError;

/// Resolve a category's records in display order.
///
/// Title lists never fail: titles that do not resolve are dropped, and a list
/// where nothing resolves yields an empty vec. Only a listing search can
/// fail, and a listing that matched nothing is empty rather than an error.
pub async fn resolve<P: MetadataProvider>(
    provider: &P,
    source: &CategorySource,
) -> Result<Vec<ProviderRecord>, CoreError> {
    match source {
        CategorySource::Listing { query, kind } => {
            match provider.search_by_title(query, *kind, 1).await {
                Ok(page) => Ok(page.items),
                Err(e) if e.kind() == FailureKind::NotFound => {
                    tracing::debug!(query = %query, "listing matched nothing");
                    Ok(Vec::new())
                }
                Err(e) => Err(CoreError::provider(e)),
            }
        }
        CategorySource::Genre(genre) => Ok(resolve_titles(provider, genre_titles(genre)).await),
        CategorySource::Titles(titles) => Ok(resolve_titles(provider, titles).await),
    }
}

/// Look up every title concurrently. Output keeps the input order, minus
/// the titles whose lookup failed.
pub async fn resolve_titles<P, S>(provider: &P, titles: &[S]) -> Vec<ProviderRecord>
where
    P: MetadataProvider,
    S: AsRef<str>,
{
    let lookups = titles.iter().map(|title| async move {
        let title = title.as_ref();
        match provider.get_by_title(title, None).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(title, kind = ?e.kind(), error = %e, "dropping unresolved title");
                None
            }
        }
    });

    let records: Vec<ProviderRecord> = join_all(lookups).await.into_iter().flatten().collect();
    tracing::debug!(requested = titles.len(), resolved = records.len(), "resolved title list");
    records
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{record, FakeError, FakeProvider};

    fn titles(list: &[&str]) -> CategorySource {
        CategorySource::Titles(list.iter().map(|t| t.to_string()).collect())
    }

    #[tokio::test]
    async fn test_all_lookups_failing_yields_empty() {
        let fake = FakeProvider::new()
            .title("A", Err(FakeError::Down))
            .title("B", Err(FakeError::NotFound));

        let records = resolve(&fake, &titles(&["A", "B", "C"])).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(fake.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_follows_input_not_completion() {
        let fake = FakeProvider::new()
            .delayed_title("A", Duration::from_millis(300), Ok(record("A")))
            .delayed_title("B", Duration::from_millis(200), Err(FakeError::Down))
            .delayed_title("C", Duration::from_millis(100), Ok(record("C")))
            .delayed_title("D", Duration::from_millis(1), Ok(record("D")));

        let records = resolve(&fake, &titles(&["A", "B", "C", "D"])).await.unwrap();
        let got: Vec<_> = records.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(got, ["A", "C", "D"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookups_run_concurrently() {
        let fake = FakeProvider::new()
            .delayed_title("A", Duration::from_secs(5), Ok(record("A")))
            .delayed_title("B", Duration::from_secs(5), Ok(record("B")));

        let start = tokio::time::Instant::now();
        let records = resolve(&fake, &titles(&["A", "B"])).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_genre_uses_canonical_list() {
        let fake = FakeProvider::with_titles(&["Saw", "Scream"]);
        let records = resolve(&fake, &CategorySource::Genre("horror".into()))
            .await
            .unwrap();
        let got: Vec<_> = records.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(got, ["Saw", "Scream"]);
        assert_eq!(fake.calls.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_listing_is_one_call() {
        let fake = FakeProvider::new().search(Ok(vec![record("Heat"), record("The Heat")]));
        let source = CategorySource::Listing {
            query: "heat".into(),
            kind: None,
        };

        let records = resolve(&fake, &source).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(*fake.calls.lock().unwrap(), ["search:heat"]);
    }

    #[tokio::test]
    async fn test_listing_not_found_is_empty() {
        let fake = FakeProvider::new().search(Err(FakeError::NotFound));
        let source = CategorySource::Listing {
            query: "zzzz".into(),
            kind: None,
        };
        assert!(resolve(&fake, &source).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_surfaces() {
        let fake = FakeProvider::new().search(Err(FakeError::Down));
        let source = CategorySource::Listing {
            query: "heat".into(),
            kind: None,
        };
        let err = resolve(&fake, &source).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Provider {
                kind: FailureKind::Transport,
                ..
            }
        ));
    }
}
