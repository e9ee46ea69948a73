//! Per-section loading/empty/error states.

use crate::catalog::CatalogError;

/// Which home screen section a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Trending,
    Popular,
}

impl SectionKind {
    pub const fn loading_text(self) -> &'static str {
        match self {
            Self::Hero => "Loading...",
            Self::Trending => "Loading trending...",
            Self::Popular => "Loading popular movies...",
        }
    }

    pub const fn empty_text(self) -> &'static str {
        match self {
            Self::Hero => "No movies found",
            Self::Trending => "No trending movies found",
            Self::Popular => "No popular movies found",
        }
    }

    /// User-facing failure text. Hero and trending use a fixed sentence;
    /// the grid surfaces the client's message.
    pub fn failure_text(self, error: &CatalogError) -> String {
        match self {
            Self::Hero => "Failed to load now playing movies...".to_string(),
            Self::Trending => "Failed to load trending movies...".to_string(),
            Self::Popular => error.message(),
        }
    }
}

/// State of one independently loaded section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionState<T> {
    Loading,
    Ready(T),
    Empty,
    Failed(String),
}

impl<T> Default for SectionState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> SectionState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Text to show in place of content, if any.
    pub fn message(&self, kind: SectionKind) -> Option<&str> {
        match self {
            Self::Loading => Some(kind.loading_text()),
            Self::Empty => Some(kind.empty_text()),
            Self::Failed(message) => Some(message),
            Self::Ready(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SectionState<U> {
        match self {
            Self::Loading => SectionState::Loading,
            Self::Ready(value) => SectionState::Ready(f(value)),
            Self::Empty => SectionState::Empty,
            Self::Failed(message) => SectionState::Failed(message),
        }
    }
}
