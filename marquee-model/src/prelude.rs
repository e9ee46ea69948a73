//! Convenience re-exports for downstream crates.

pub use crate::error::ModelError;
pub use crate::ids::MovieID;
pub use crate::image::{BackdropSize, PosterSize};
pub use crate::movie::MovieSummary;
pub use crate::page::{ListResponse, Page};
