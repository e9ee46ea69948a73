use tracing::{debug, trace};

use super::state::{
    DEFAULT_ITEM_GAP, DEFAULT_ITEM_WIDTH, RailGeometry, RailState,
    ScrollDirection, ScrollRequest, ViewportClass,
};

/// Layout and scroll events reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RailMessage {
    /// The item list changed; `item_width` is the first card's measured
    /// width when one has been laid out.
    ItemsChanged {
        count: usize,
        item_width: Option<f32>,
    },
    Resized {
        window_width: f32,
        viewport_width: f32,
    },
    Scrolled { offset: f32 },
    /// Explicit scrollable width, overriding the derived one.
    ContentMeasured { content_width: f32 },
}

/// Scroll affordances and jump sizing for the trending rail.
#[derive(Debug, Clone)]
pub struct RailController {
    geometry: RailGeometry,
    window_width: f32,
    item_count: usize,
    item_width: Option<f32>,
    item_gap: f32,
    affordances: RailState,
    attached: bool,
}

impl RailController {
    pub fn new(window_width: f32, viewport_width: f32) -> Self {
        let mut rail = Self {
            geometry: RailGeometry {
                scroll_offset: 0.0,
                viewport_width,
                content_width: 0.0,
            },
            window_width,
            item_count: 0,
            item_width: None,
            item_gap: DEFAULT_ITEM_GAP,
            affordances: RailState::default(),
            attached: true,
        };
        rail.update_affordances();
        rail
    }

    pub fn with_item_gap(mut self, gap: f32) -> Self {
        self.item_gap = gap.max(0.0);
        self.recompute_content_width();
        self.update_affordances();
        self
    }

    pub fn geometry(&self) -> &RailGeometry {
        &self.geometry
    }

    pub fn affordances(&self) -> RailState {
        self.affordances
    }

    pub fn viewport_class(&self) -> ViewportClass {
        ViewportClass::from_window_width(self.window_width)
    }

    /// Measured card width, or the default before anything is laid out.
    pub fn item_width(&self) -> f32 {
        self.item_width
            .filter(|width| width.is_finite() && *width > 0.0)
            .unwrap_or(DEFAULT_ITEM_WIDTH)
    }

    pub fn jump_distance(&self) -> f32 {
        self.item_width() * self.viewport_class().cards_per_swipe() as f32
    }

    pub fn update_affordances(&mut self) -> RailState {
        self.affordances = RailState::from_geometry(&self.geometry);
        trace!(
            affordances = ?self.affordances,
            geometry = ?self.geometry,
            "rail affordances"
        );
        self.affordances
    }

    /// Request a swipe in `direction`; `None` while that way is blocked.
    pub fn scroll(&self, direction: ScrollDirection) -> Option<ScrollRequest> {
        if !self.attached || !self.affordances.allows(direction) {
            return None;
        }
        let request = ScrollRequest {
            delta: direction.sign() * self.jump_distance(),
            smooth: true,
        };
        debug!(?direction, delta = request.delta, "rail scroll");
        Some(request)
    }

    pub fn update(&mut self, message: RailMessage) -> RailState {
        if !self.attached {
            return self.affordances;
        }
        match message {
            RailMessage::ItemsChanged { count, item_width } => {
                self.item_count = count;
                if item_width.is_some() {
                    self.item_width = item_width;
                }
                self.recompute_content_width();
            }
            RailMessage::Resized {
                window_width,
                viewport_width,
            } => {
                self.window_width = window_width;
                self.geometry.viewport_width = viewport_width.max(0.0);
            }
            RailMessage::Scrolled { offset } => {
                self.geometry.scroll_offset = offset.max(0.0);
            }
            RailMessage::ContentMeasured { content_width } => {
                self.geometry.content_width = content_width.max(0.0);
            }
        }
        self.update_affordances()
    }

    /// Stop reacting to layout events (view unmounted).
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn recompute_content_width(&mut self) {
        if self.item_count == 0 {
            self.geometry.content_width = 0.0;
            return;
        }
        let w = self.item_width();
        self.geometry.content_width = self.item_count as f32 * w
            + self.item_count.saturating_sub(1) as f32 * self.item_gap;
    }
}
