//! Infinite pagination over a catalog feed.

pub mod cache;
pub mod feed;

pub use cache::{Completion, FetchTicket, PaginationCache};
pub use feed::{FetchOutcome, PaginatedFeed};
