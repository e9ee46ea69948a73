//! Client-side core of the Marquee movie browser.
//!
//! The crate talks to the remote catalog, caches paginated feeds and holds
//! the state machines behind the home screen: the autoplaying hero
//! carousel, the trending rail and the popular grid. Rendering is left to
//! the caller; everything here is driven by explicit messages.
#![allow(missing_docs)]

pub mod carousel;
pub mod catalog;
pub mod home;
pub mod pagination;
pub mod prelude;
pub mod rail;

pub use carousel::{ArrowKey, CarouselMessage, CarouselState, HeroCarousel};
pub use catalog::{
    CatalogApi, CatalogClient, CatalogError, CatalogErrorKind, Feed,
    FeedSource, PageSource,
};
pub use home::{HomeOptions, HomeScreen, SectionKind, SectionState};
pub use pagination::{FetchOutcome, PaginatedFeed, PaginationCache};
pub use rail::{RailController, RailMessage, RailState, ScrollDirection};
