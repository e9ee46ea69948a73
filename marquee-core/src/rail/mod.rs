//! Horizontally scrollable rail with directional affordances.

pub mod controller;
pub mod state;

pub use controller::{RailController, RailMessage};
pub use state::{
    DEFAULT_ITEM_WIDTH, RailGeometry, RailState, ScrollDirection,
    ScrollRequest, ViewportClass,
};
