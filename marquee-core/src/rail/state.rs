//! Horizontal rail geometry and derived scroll affordances.

/// Width assumed for a card before one has been laid out and measured.
pub const DEFAULT_ITEM_WIDTH: f32 = 240.0;
/// Gap between cards in the rail track.
pub const DEFAULT_ITEM_GAP: f32 = 16.0;
/// Slack for fractional scroll offsets reported by layout.
const SCROLL_TOLERANCE: f32 = 1.0;

const NARROW_MAX_WIDTH: f32 = 640.0;
const MEDIUM_MAX_WIDTH: f32 = 1024.0;

/// Window width breakpoints deciding how many cards one swipe moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Narrow,
    Medium,
    Wide,
}

impl ViewportClass {
    pub fn from_window_width(width: f32) -> Self {
        if width < NARROW_MAX_WIDTH {
            Self::Narrow
        } else if width < MEDIUM_MAX_WIDTH {
            Self::Medium
        } else {
            Self::Wide
        }
    }

    pub const fn cards_per_swipe(self) -> usize {
        match self {
            Self::Narrow => 1,
            Self::Medium => 2,
            Self::Wide => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Measured layout of the scroll container, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RailGeometry {
    pub scroll_offset: f32,
    pub viewport_width: f32,
    pub content_width: f32,
}

impl RailGeometry {
    pub fn max_scroll(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }
}

/// Whether each scroll button is enabled. Always derived from geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RailState {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
}

impl RailState {
    pub fn from_geometry(geometry: &RailGeometry) -> Self {
        Self {
            can_scroll_left: geometry.scroll_offset > 0.0,
            can_scroll_right: geometry.scroll_offset + geometry.viewport_width
                < geometry.content_width - SCROLL_TOLERANCE,
        }
    }

    pub fn allows(&self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Left => self.can_scroll_left,
            ScrollDirection::Right => self.can_scroll_right,
        }
    }
}

/// Smooth relative scroll the presentation layer should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub delta: f32,
    pub smooth: bool,
}

impl ScrollRequest {
    /// Where the container ends up once the scroll settles.
    pub fn target_offset(&self, geometry: &RailGeometry) -> f32 {
        (geometry.scroll_offset + self.delta).clamp(0.0, geometry.max_scroll())
    }
}
