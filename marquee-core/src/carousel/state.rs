//! Single-slide carousel with wraparound navigation.

use tracing::debug;

use super::messages::CarouselMessage;

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState<T> {
    items: Vec<T>,
    // Only meaningful while `items` is non-empty
    current_index: usize,
}

impl<T> Default for CarouselState<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> CarouselState<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            current_index: 0,
        }
    }

    /// Keep only the first `limit` items (the hero shows a fixed slice of
    /// the now-playing feed).
    pub fn with_limit(mut items: Vec<T>, limit: usize) -> Self {
        items.truncate(limit);
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.current_index)
    }

    pub fn next(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + 1) % len;
    }

    pub fn previous(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + len - 1) % len;
    }

    /// Jump straight to `index`. Out of range requests are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            debug!(
                index,
                len = self.items.len(),
                "ignoring out of range go_to"
            );
            return false;
        }
        self.current_index = index;
        true
    }

    /// Replace the list, resetting to the first slide if the current index
    /// no longer fits.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.current_index >= self.items.len() {
            self.current_index = 0;
        }
    }

    /// Apply a navigation command. Returns whether the index may have moved.
    ///
    /// `Tick` is treated like `Next`; epoch filtering happens in the owner
    /// of the autoplay timer.
    pub fn apply(&mut self, message: CarouselMessage) -> bool {
        if self.items.is_empty() {
            return false;
        }
        match message {
            CarouselMessage::Next | CarouselMessage::Tick { .. } => self.next(),
            CarouselMessage::Previous => self.previous(),
            CarouselMessage::GoTo(index) => return self.go_to(index),
            CarouselMessage::Key(key) => return self.apply(key.command()),
        }
        true
    }
}
