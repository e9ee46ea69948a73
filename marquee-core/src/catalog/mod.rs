//! Fetch client for the remote movie catalog.

pub mod client;
pub mod error;
pub mod source;

pub use client::{CatalogApi, CatalogClient};
pub use error::{CatalogError, CatalogErrorKind};
pub use source::{Feed, FeedSource, PageSource};

#[cfg(test)]
pub use client::MockCatalogApi;
