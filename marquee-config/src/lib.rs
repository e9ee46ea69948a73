//! Configuration for the Marquee catalog client.
//!
//! Values are read once at startup (`.env`, optional TOML file, process
//! environment) into an immutable [`CatalogConfig`] that is handed to the
//! fetch client at construction.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions,
};
pub use models::{ApiKey, CatalogConfig};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
