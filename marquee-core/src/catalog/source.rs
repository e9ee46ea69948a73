use async_trait::async_trait;
use marquee_model::{MovieSummary, Page};

use super::{client::CatalogApi, error::CatalogError};

/// Anything that can produce numbered pages of movies.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError>;
}

/// Paginated catalog feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Popular,
    TrendingWeek,
}

/// Adapts one feed of a [`CatalogApi`] into a [`PageSource`].
#[derive(Debug, Clone)]
pub struct FeedSource<A> {
    api: A,
    feed: Feed,
}

impl<A> FeedSource<A> {
    pub fn new(api: A, feed: Feed) -> Self {
        Self { api, feed }
    }

    pub fn feed(&self) -> Feed {
        self.feed
    }
}

#[async_trait]
impl<A> PageSource for FeedSource<A>
where
    A: CatalogApi,
{
    async fn fetch_page(
        &self,
        page: u32,
    ) -> Result<Page<MovieSummary>, CatalogError> {
        match self.feed {
            Feed::Popular => self.api.popular(page).await,
            Feed::TrendingWeek => self.api.trending_week(page).await,
        }
    }
}
