use std::{sync::Arc, time::Duration};

use marquee_config::CatalogConfig;
use marquee_model::{MovieSummary, Page};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::{
    lifetime::ViewLifetime,
    section::{SectionKind, SectionState},
};
use crate::{
    carousel::{CarouselMessage, HeroCarousel},
    catalog::{CatalogApi, CatalogError},
    pagination::{Completion, FetchTicket, PaginationCache},
    rail::{
        RailController, RailMessage, RailState, ScrollDirection, ScrollRequest,
    },
};

const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Limits and layout inputs for a [`HomeScreen`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeOptions {
    pub hero_limit: usize,
    pub trending_limit: usize,
    pub autoplay_interval: Duration,
    pub window_width: f32,
    pub viewport_width: f32,
}

impl HomeOptions {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            hero_limit: config.hero_limit,
            trending_limit: config.trending_limit,
            autoplay_interval: config.autoplay_interval,
            window_width: DEFAULT_WINDOW_WIDTH,
            viewport_width: DEFAULT_WINDOW_WIDTH,
        }
    }

    pub fn with_window(
        mut self,
        window_width: f32,
        viewport_width: f32,
    ) -> Self {
        self.window_width = window_width;
        self.viewport_width = viewport_width;
        self
    }
}

impl Default for HomeOptions {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}

/// Trending movies together with the rail that scrolls them.
#[derive(Debug, Clone)]
pub struct TrendingRail {
    items: Vec<MovieSummary>,
    rail: RailController,
}

impl TrendingRail {
    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn rail(&self) -> &RailController {
        &self.rail
    }
}

/// The home screen: hero carousel, trending rail and popular grid.
///
/// Each section loads and fails on its own. Once [`HomeScreen::unmount`]
/// runs (or the token from [`HomeScreen::lifetime_token`] is cancelled),
/// in-flight results are dropped and no further state changes are applied.
#[derive(Debug)]
pub struct HomeScreen<A> {
    api: Arc<A>,
    options: HomeOptions,
    lifetime: ViewLifetime,
    hero: SectionState<HeroCarousel>,
    trending: SectionState<TrendingRail>,
    popular: PaginationCache<MovieSummary>,
}

impl<A> HomeScreen<A>
where
    A: CatalogApi,
{
    pub fn new(api: Arc<A>, options: HomeOptions) -> Self {
        Self {
            api,
            options,
            lifetime: ViewLifetime::new(),
            hero: SectionState::Loading,
            trending: SectionState::Loading,
            popular: PaginationCache::new(),
        }
    }

    pub fn options(&self) -> &HomeOptions {
        &self.options
    }

    pub fn hero(&self) -> &SectionState<HeroCarousel> {
        &self.hero
    }

    pub fn trending(&self) -> &SectionState<TrendingRail> {
        &self.trending
    }

    /// Popular grid as a section: the flattened items of every fetched page.
    ///
    /// A failed first page fails the section; a failed later page keeps the
    /// items already shown and is reported through `popular_error`.
    pub fn popular(&self) -> SectionState<Vec<&MovieSummary>> {
        let cache = &self.popular;
        if cache.pages().is_empty() {
            return match cache.last_error() {
                Some(message) => SectionState::Failed(message.to_string()),
                None => SectionState::Loading,
            };
        }
        let items: Vec<&MovieSummary> = cache.flattened_items().collect();
        if items.is_empty() && !cache.has_next_page() {
            SectionState::Empty
        } else {
            SectionState::Ready(items)
        }
    }

    pub fn popular_cache(&self) -> &PaginationCache<MovieSummary> {
        &self.popular
    }

    pub fn popular_error(&self) -> Option<&str> {
        self.popular.last_error()
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifetime.is_cancelled()
    }

    /// Cancelling this token unmounts the screen's in-flight work.
    pub fn lifetime_token(&self) -> CancellationToken {
        self.lifetime.token()
    }

    /// Fetch all three sections concurrently.
    ///
    /// Calling it again refreshes every section and restarts the grid at
    /// page 1.
    pub async fn load(&mut self) {
        if self.lifetime.is_cancelled() {
            debug!("home screen unmounted, skipping load");
            return;
        }
        if !self.popular.pages().is_empty()
            || self.popular.last_error().is_some()
        {
            self.popular.reset();
        }
        let popular_ticket = self.popular.begin_next();

        let api = Arc::clone(&self.api);
        let work = async {
            let popular = async {
                match popular_ticket {
                    Some(ticket) => {
                        Some((ticket, api.popular(ticket.page()).await))
                    }
                    None => None,
                }
            };
            tokio::join!(api.now_playing(), api.trending_week(1), popular)
        };

        let Some((now_playing, trending, popular)) =
            self.lifetime.run(work).await
        else {
            debug!("home screen unmounted during load, dropping results");
            self.popular.detach();
            return;
        };

        self.apply_now_playing(now_playing);
        self.apply_trending(trending);
        if let Some((ticket, result)) = popular {
            self.apply_popular(ticket, result);
        }
        info!(
            hero = self.hero.is_ready(),
            trending = self.trending.is_ready(),
            popular = self.popular.flattened_len(),
            "home screen loaded"
        );
    }

    /// Fetch the next popular page, if one exists and none is in flight.
    pub async fn load_more_popular(&mut self) -> Option<Completion> {
        if self.lifetime.is_cancelled() {
            return None;
        }
        let ticket = self.popular.begin_next()?;
        let api = Arc::clone(&self.api);
        match self.lifetime.run(api.popular(ticket.page())).await {
            Some(result) => Some(self.apply_popular(ticket, result)),
            None => {
                self.popular.detach();
                Some(Completion::Discarded)
            }
        }
    }

    /// Route a navigation or autoplay message to the hero carousel.
    pub fn handle_carousel(&mut self, message: CarouselMessage) -> bool {
        if self.lifetime.is_cancelled() {
            return false;
        }
        match self.hero.ready_mut() {
            Some(hero) => hero.update(message),
            None => false,
        }
    }

    pub fn handle_rail(&mut self, message: RailMessage) -> Option<RailState> {
        if self.lifetime.is_cancelled() {
            return None;
        }
        if let RailMessage::Resized {
            window_width,
            viewport_width,
        } = message
        {
            self.options =
                self.options.with_window(window_width, viewport_width);
        }
        self.trending
            .ready_mut()
            .map(|trending| trending.rail.update(message))
    }

    pub fn scroll_trending(
        &self,
        direction: ScrollDirection,
    ) -> Option<ScrollRequest> {
        self.trending.ready()?.rail.scroll(direction)
    }

    /// Next autoplay tick for the hero. Pending while there is no carousel.
    pub async fn next_autoplay_tick(&mut self) -> Option<CarouselMessage> {
        match self.hero.ready_mut() {
            Some(hero) => hero.next_tick().await,
            None => std::future::pending().await,
        }
    }

    /// Tear down: stop autoplay, detach the rail, drop in-flight results.
    pub fn unmount(&mut self) {
        self.lifetime.cancel();
        if let Some(hero) = self.hero.ready_mut() {
            hero.unmount();
        }
        if let Some(trending) = self.trending.ready_mut() {
            trending.rail.detach();
        }
        self.popular.detach();
        debug!("home screen unmounted");
    }

    fn apply_now_playing(
        &mut self,
        result: Result<Vec<MovieSummary>, CatalogError>,
    ) {
        match result {
            Ok(mut movies) => {
                movies.truncate(self.options.hero_limit);
                if movies.is_empty() {
                    if let Some(hero) = self.hero.ready_mut() {
                        hero.unmount();
                    }
                    self.hero = SectionState::Empty;
                    return;
                }
                let mut hero = match std::mem::take(&mut self.hero) {
                    SectionState::Ready(hero) => hero,
                    _ => HeroCarousel::new(self.options.autoplay_interval),
                };
                hero.set_items(movies);
                hero.mount();
                self.hero = SectionState::Ready(hero);
            }
            Err(err) => {
                error!(error = %err, "failed to load now playing movies");
                if let Some(hero) = self.hero.ready_mut() {
                    hero.unmount();
                }
                self.hero = SectionState::Failed(
                    SectionKind::Hero.failure_text(&err),
                );
            }
        }
    }

    fn apply_trending(
        &mut self,
        result: Result<Page<MovieSummary>, CatalogError>,
    ) {
        match result {
            Ok(page) => {
                let mut items = page.into_items();
                items.truncate(self.options.trending_limit);
                if items.is_empty() {
                    self.trending = SectionState::Empty;
                    return;
                }
                let mut rail = RailController::new(
                    self.options.window_width,
                    self.options.viewport_width,
                );
                rail.update(RailMessage::ItemsChanged {
                    count: items.len(),
                    item_width: None,
                });
                self.trending =
                    SectionState::Ready(TrendingRail { items, rail });
            }
            Err(err) => {
                error!(error = %err, "failed to load trending movies");
                self.trending = SectionState::Failed(
                    SectionKind::Trending.failure_text(&err),
                );
            }
        }
    }

    fn apply_popular(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page<MovieSummary>, CatalogError>,
    ) -> Completion {
        let completion = self.popular.complete(ticket, result);
        if let Completion::Failed { page, error } = &completion {
            warn!(page, error = %error, "failed to load popular movies");
        }
        completion
    }
}
