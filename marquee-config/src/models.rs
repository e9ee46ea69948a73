use std::fmt;
use std::time::Duration;

use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_HERO_LIMIT: usize = 10;
pub const DEFAULT_TRENDING_LIMIT: usize = 20;
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

/// API credential attached to every outbound catalog request.
///
/// The value never shows up in `Debug` output and is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for blank input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Immutable, process-wide catalog settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub api_key: Option<ApiKey>,
    pub language: String,
    pub request_timeout: Duration,
    pub image_base: Url,
    /// Number of now-playing items kept for the hero carousel
    pub hero_limit: usize,
    /// Number of trending items kept for the rail
    pub trending_limit: usize,
    pub autoplay_interval: Duration,
}

impl CatalogConfig {
    /// Defaults pointing at the public TMDB v3 API.
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            base_url: parse_static(DEFAULT_BASE_URL),
            api_key,
            language: DEFAULT_LANGUAGE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            image_base: parse_static(DEFAULT_IMAGE_BASE),
            hero_limit: DEFAULT_HERO_LIMIT,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve an API path (`/movie/popular`) against the base URL.
    ///
    /// The base keeps its own path prefix (`/3`), so joining is done on the
    /// string form rather than with `Url::join`, which would drop it.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

fn parse_static(raw: &'static str) -> Url {
    match Url::parse(raw) {
        Ok(url) => url,
        Err(err) => unreachable!("built-in URL {raw} is invalid: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").expect("key");
        assert_eq!(format!("{key:?}"), "ApiKey(<redacted>)");
        assert_eq!(key.expose(), "super-secret");
    }

    #[test]
    fn blank_api_key_is_none() {
        assert!(ApiKey::new("   ").is_none());
    }

    #[test]
    fn endpoint_keeps_version_prefix() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.endpoint("/movie/popular"),
            "https://api.themoviedb.org/3/movie/popular"
        );
    }
}
