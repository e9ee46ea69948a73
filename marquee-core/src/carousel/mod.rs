//! Hero carousel: wraparound slide state plus autoplay.

pub mod autoplay;
pub mod hero;
pub mod messages;
pub mod state;

pub use autoplay::AutoplayTimer;
pub use hero::HeroCarousel;
pub use messages::{ArrowKey, CarouselMessage};
pub use state::CarouselState;
