//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod image;
pub mod movie;
pub mod page;
pub mod prelude;

pub use error::{ModelError, Result as ModelResult};
pub use ids::MovieID;
pub use image::{BackdropSize, PosterSize, image_url};
pub use movie::MovieSummary;
pub use page::{ListResponse, Page};
