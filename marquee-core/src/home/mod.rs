//! Home screen composition: three independently loaded sections.

pub mod lifetime;
pub mod screen;
pub mod section;

pub use lifetime::ViewLifetime;
pub use screen::{HomeOptions, HomeScreen, TrendingRail};
pub use section::{SectionKind, SectionState};
