//! Convenience re-exports for binaries and tests.

pub use crate::carousel::{
    ArrowKey, AutoplayTimer, CarouselMessage, CarouselState, HeroCarousel,
};
pub use crate::catalog::{
    CatalogApi, CatalogClient, CatalogError, CatalogErrorKind, Feed,
    FeedSource, PageSource,
};
pub use crate::home::{
    HomeOptions, HomeScreen, SectionKind, SectionState, TrendingRail,
    ViewLifetime,
};
pub use crate::pagination::{
    Completion, FetchOutcome, FetchTicket, PaginatedFeed, PaginationCache,
};
pub use crate::rail::{
    RailController, RailGeometry, RailMessage, RailState, ScrollDirection,
    ScrollRequest, ViewportClass,
};
pub use marquee_model::prelude::*;
