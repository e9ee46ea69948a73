//! Navigation commands shared by the timer, buttons, dots and keyboard.

/// Every carousel input is expressed as one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselMessage {
    Next,
    Previous,
    /// Pagination dot click
    GoTo(usize),
    Key(ArrowKey),
    /// Autoplay tick from the timer started at `epoch`
    Tick { epoch: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

impl ArrowKey {
    /// Parse a DOM-style key name (`ArrowLeft`, `ArrowRight`).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn command(self) -> CarouselMessage {
        match self {
            Self::Left => CarouselMessage::Previous,
            Self::Right => CarouselMessage::Next,
        }
    }
}
