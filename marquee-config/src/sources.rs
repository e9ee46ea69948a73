use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub catalog: FileCatalogConfig,
    #[serde(default)]
    pub home: FileHomeConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Humantime string such as `15s`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileHomeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending_limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_interval: Option<String>,
}

/// Values picked up from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub language: Option<String>,
    pub request_timeout: Option<String>,
    pub image_base: Option<String>,
    pub hero_limit: Option<String>,
    pub trending_limit: Option<String>,
    pub autoplay_interval: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            config_path: get("MARQUEE_CONFIG").map(PathBuf::from),
            base_url: get("MARQUEE_BASE_URL"),
            api_key: get("MARQUEE_API_KEY").or_else(|| get("TMDB_API_KEY")),
            language: get("MARQUEE_LANGUAGE"),
            request_timeout: get("MARQUEE_REQUEST_TIMEOUT"),
            image_base: get("MARQUEE_IMAGE_BASE"),
            hero_limit: get("MARQUEE_HERO_LIMIT"),
            trending_limit: get("MARQUEE_TRENDING_LIMIT"),
            autoplay_interval: get("MARQUEE_AUTOPLAY_INTERVAL"),
        }
    }
}
