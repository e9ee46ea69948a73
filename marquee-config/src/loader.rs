use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::{
    models::{
        ApiKey, CatalogConfig, DEFAULT_AUTOPLAY_INTERVAL, DEFAULT_BASE_URL,
        DEFAULT_HERO_LIMIT, DEFAULT_IMAGE_BASE, DEFAULT_LANGUAGE,
        DEFAULT_REQUEST_TIMEOUT, DEFAULT_TRENDING_LIMIT,
    },
    sources::{EnvConfig, FileConfig},
    validation::ConfigWarnings,
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("marquee.toml"),
        PathBuf::from("config/marquee.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

/// Composed configuration plus the non-fatal findings gathered on the way.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: CatalogConfig,
    pub warnings: ConfigWarnings,
    pub env_file_loaded: bool,
    pub config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, read the process environment and compose.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let mut load = self.load_from(EnvConfig::gather())?;
        load.env_file_loaded = env_file_loaded;
        if env_file_loaded {
            info!("loaded .env file");
        }
        Ok(load)
    }

    /// Compose from an already gathered environment; no `.env` handling.
    pub fn load_from(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) =
            compose_config(file_config.unwrap_or_default(), env)?;

        warnings.log();

        Ok(ConfigLoad {
            config,
            warnings,
            env_file_loaded: false,
            config_path,
        })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };
        Ok(loaded)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig { path });
                }
                path
            }
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => path.clone(),
                None => {
                    debug!("no marquee.toml found, using environment only");
                    return Ok((None, None));
                }
            },
        };

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file: FileConfig,
    env: EnvConfig,
) -> Result<(CatalogConfig, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();
    let FileConfig {
        catalog: file_catalog,
        home: file_home,
    } = file;

    let base_url = parse_url(
        "MARQUEE_BASE_URL",
        env.base_url
            .or(file_catalog.base_url)
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL),
    )?;
    let image_base = parse_url(
        "MARQUEE_IMAGE_BASE",
        env.image_base
            .or(file_catalog.image_base)
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_BASE),
    )?;

    let api_key = env
        .api_key
        .or(file_catalog.api_key)
        .and_then(ApiKey::new);
    if api_key.is_none() {
        warnings.push_with_hint(
            "catalog API key is missing; requests will likely be rejected",
            "set MARQUEE_API_KEY (or TMDB_API_KEY) in the environment or .env",
        );
    }

    let language = env
        .language
        .or(file_catalog.language)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let request_timeout =
        match env.request_timeout.or(file_catalog.request_timeout) {
            Some(raw) => parse_duration("MARQUEE_REQUEST_TIMEOUT", &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };
    let autoplay_interval =
        match env.autoplay_interval.or(file_home.autoplay_interval) {
            Some(raw) => parse_duration("MARQUEE_AUTOPLAY_INTERVAL", &raw)?,
            None => DEFAULT_AUTOPLAY_INTERVAL,
        };

    let hero_limit = match env.hero_limit {
        Some(raw) => parse_count("MARQUEE_HERO_LIMIT", &raw)?,
        None => file_home.hero_limit.unwrap_or(DEFAULT_HERO_LIMIT),
    };
    let trending_limit = match env.trending_limit {
        Some(raw) => parse_count("MARQUEE_TRENDING_LIMIT", &raw)?,
        None => file_home.trending_limit.unwrap_or(DEFAULT_TRENDING_LIMIT),
    };

    let config = CatalogConfig {
        base_url,
        api_key,
        language,
        request_timeout,
        image_base,
        hero_limit,
        trending_limit,
        autoplay_interval,
    };

    Ok((config, warnings))
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigLoadError> {
    Url::parse(raw)
        .map_err(|source| ConfigLoadError::InvalidUrl { key, source })
}

fn parse_duration(
    key: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    let duration = humantime::parse_duration(raw).map_err(|_| {
        ConfigLoadError::InvalidDuration {
            key,
            value: raw.to_string(),
        }
    })?;
    if duration.is_zero() {
        return Err(ConfigLoadError::InvalidDuration {
            key,
            value: raw.to_string(),
        });
    }
    Ok(duration)
}

fn parse_count(key: &'static str, raw: &str) -> Result<usize, ConfigLoadError> {
    raw.parse::<usize>()
        .map_err(|_| ConfigLoadError::InvalidNumber {
            key,
            value: raw.to_string(),
        })
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid URL in {key}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid duration '{value}' in {key}")]
    InvalidDuration { key: &'static str, value: String },
    #[error("invalid number '{value}' in {key}")]
    InvalidNumber { key: &'static str, value: String },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
