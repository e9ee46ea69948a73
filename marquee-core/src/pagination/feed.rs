use marquee_model::{MovieSummary, Page};
use tokio::sync::Mutex;
use tracing::debug;

use super::cache::{Completion, PaginationCache};
use crate::catalog::{CatalogError, PageSource};

/// Result of one `fetch_next` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Appended { page: u32, items: usize },
    Failed(CatalogError),
    /// Another fetch was in flight; nothing was requested.
    Busy,
    /// The last page has already been fetched.
    Exhausted,
    /// The feed was detached while the request was outstanding.
    Discarded,
}

/// Async driver around a [`PaginationCache`].
///
/// The cache lock is held only to claim a ticket and to apply the result,
/// never across the network await, so overlapping callers observe the
/// in-flight ticket and back off instead of queueing.
#[derive(Debug)]
pub struct PaginatedFeed<S> {
    source: S,
    cache: Mutex<PaginationCache<MovieSummary>>,
}

impl<S> PaginatedFeed<S>
where
    S: PageSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(PaginationCache::new()),
        }
    }

    /// Request one page directly, bypassing the cache.
    pub async fn fetch_page(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError> {
        self.source.fetch_page(page).await
    }

    pub async fn fetch_next(&self) -> FetchOutcome {
        let ticket = {
            let mut cache = self.cache.lock().await;
            match cache.begin_next() {
                Some(ticket) => ticket,
                None if cache.is_loading() => return FetchOutcome::Busy,
                None => return FetchOutcome::Exhausted,
            }
        };

        debug!(page = ticket.page(), "fetching next page");
        let result = self.source.fetch_page(ticket.page()).await;

        let mut cache = self.cache.lock().await;
        match cache.complete(ticket, result) {
            Completion::Appended { page, items } => {
                FetchOutcome::Appended { page, items }
            }
            Completion::Failed { error, .. } => FetchOutcome::Failed(error),
            Completion::Discarded => FetchOutcome::Discarded,
        }
    }

    /// Copy of the flattened view, in page order.
    pub async fn snapshot(&self) -> Vec<MovieSummary> {
        self.cache.lock().await.flattened_items().cloned().collect()
    }

    pub async fn flattened_len(&self) -> usize {
        self.cache.lock().await.flattened_len()
    }

    pub async fn has_next_page(&self) -> bool {
        self.cache.lock().await.has_next_page()
    }

    pub async fn is_loading(&self) -> bool {
        self.cache.lock().await.is_loading()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.cache.lock().await.last_error().map(str::to_string)
    }

    /// Run `f` against the cache under the lock.
    pub async fn with_cache<R>(
        &self,
        f: impl FnOnce(&PaginationCache<MovieSummary>) -> R,
    ) -> R {
        f(&*self.cache.lock().await)
    }

    pub async fn reset(&self) {
        self.cache.lock().await.reset();
    }

    /// Late completions after this point are dropped.
    pub async fn detach(&self) {
        self.cache.lock().await.detach();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;

    fn movies(page: u32, count: usize) -> Vec<MovieSummary> {
        (0..count)
            .map(|i| {
                let id = u64::from(page) * 100 + i as u64;
                MovieSummary::new(id, format!("Movie {id}"))
            })
            .collect()
    }

    /// Three pages of 20/20/15 items, total 55.
    #[derive(Debug, Default)]
    struct FixedCatalog {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageSource for FixedCatalog {
        async fn fetch_page(
            &self,
            page: u32,
        ) -> Result<Page<MovieSummary>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let count = if page == 3 { 15 } else { 20 };
            Ok(Page::new(page, movies(page, count), 3, 55))
        }
    }

    #[derive(Debug, Default)]
    struct GatedCatalog {
        calls: AtomicUsize,
        gate: Notify,
    }

    #[async_trait]
    impl PageSource for GatedCatalog {
        async fn fetch_page(
            &self,
            page: u32,
        ) -> Result<Page<MovieSummary>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(Page::new(page, movies(page, 20), 5, 100))
        }
    }

    #[tokio::test]
    async fn three_fetches_flatten_to_55_items() {
        let feed = PaginatedFeed::new(FixedCatalog::default());
        for _ in 0..3 {
            assert!(matches!(
                feed.fetch_next().await,
                FetchOutcome::Appended { .. }
            ));
        }

        assert_eq!(feed.flattened_len().await, 55);
        assert!(!feed.has_next_page().await);
        assert_eq!(feed.fetch_next().await, FetchOutcome::Exhausted);
        assert_eq!(feed.source.calls.load(Ordering::SeqCst), 3);

        let ids: Vec<u64> =
            feed.snapshot().await.iter().map(|m| m.id.as_u64()).collect();
        assert_eq!(ids.first(), Some(&100));
        assert_eq!(ids.last(), Some(&314));
    }

    #[tokio::test]
    async fn overlapping_fetch_next_hits_network_once() {
        let feed = PaginatedFeed::new(GatedCatalog::default());

        let (first, second) = tokio::join!(feed.fetch_next(), async {
            let outcome = feed.fetch_next().await;
            feed.source.gate.notify_one();
            outcome
        });

        assert_eq!(first, FetchOutcome::Appended { page: 1, items: 20 });
        assert_eq!(second, FetchOutcome::Busy);
        assert_eq!(feed.source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(feed.with_cache(|cache| cache.pages().len()).await, 1);
    }

    #[tokio::test]
    async fn with_cache_reads_the_live_cache() {
        let feed = PaginatedFeed::new(FixedCatalog::default());
        assert_eq!(feed.with_cache(|cache| cache.next_page()).await, Some(1));

        feed.fetch_next().await;
        feed.fetch_next().await;

        let (pages, next) = feed
            .with_cache(|cache| (cache.pages().len(), cache.next_page()))
            .await;
        assert_eq!(pages, 2);
        assert_eq!(next, Some(3));
        assert!(feed.with_cache(|cache| !cache.is_loading()).await);
    }

    #[tokio::test]
    async fn detach_while_in_flight_discards_result() {
        let feed = Arc::new(PaginatedFeed::new(GatedCatalog::default()));

        let (outcome, ()) = tokio::join!(feed.fetch_next(), async {
            feed.detach().await;
            feed.source.gate.notify_one();
        });

        assert_eq!(outcome, FetchOutcome::Discarded);
        assert_eq!(feed.flattened_len().await, 0);
    }
}
