use std::fmt::{Display, Formatter};

/// Poster image sizes (2:3 aspect ratio) served by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosterSize {
    /// 92px width - tiny thumbnail
    W92,
    /// 154px width
    W154,
    /// 185px width - small card
    W185,
    /// 342px width - grid and rail cards (default)
    #[default]
    W342,
    /// 500px width
    W500,
    /// 780px width - high quality poster
    W780,
    /// Source resolution
    Original,
}

impl PosterSize {
    /// All fixed-width poster sizes, smallest first
    pub const ALL: [PosterSize; 6] = [
        Self::W92,
        Self::W154,
        Self::W185,
        Self::W342,
        Self::W500,
        Self::W780,
    ];

    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W92 => Some(92),
            Self::W154 => Some(154),
            Self::W185 => Some(185),
            Self::W342 => Some(342),
            Self::W500 => Some(500),
            Self::W780 => Some(780),
            Self::Original => None,
        }
    }

    /// Path segment understood by the image CDN
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

impl Display for PosterSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.width() {
            Some(w) => write!(f, "{w}px"),
            None => write!(f, "Original"),
        }
    }
}

/// Backdrop image sizes (16:9 aspect ratio), used by the hero carousel.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackdropSize {
    W300,
    W780,
    /// 1280px width - hero banner (default)
    #[default]
    W1280,
    Original,
}

impl BackdropSize {
    pub const fn width(&self) -> Option<u16> {
        match self {
            Self::W300 => Some(300),
            Self::W780 => Some(780),
            Self::W1280 => Some(1280),
            Self::Original => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W300 => "w300",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

impl Display for BackdropSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.width() {
            Some(w) => write!(f, "{w}px"),
            None => write!(f, "Original"),
        }
    }
}

/// Join an image CDN base, a size segment and a catalog image path.
///
/// Catalog paths come with a leading slash (`/abc.jpg`); bases may or may not
/// carry a trailing one. Exactly one separator ends up between each part.
pub fn image_url(base: &str, size: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let size = size.trim_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{size}/{path}")
}
