//! ConfigLoader facade over the layered sources.

use super::sources;
use super::CatalogConfig;
use config::{Config, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "dircatalog.toml";

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration. Precedence: defaults (lowest) -> file -> environment
    /// -> REPOSITORY_ROOT (highest).
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<CatalogConfig, ConfigError> {
        let builder = Config::builder().add_source(Config::try_from(&CatalogConfig::default())?);
        let builder = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                builder.add_source(File::from(path.to_path_buf()).required(true))
            }
            None => builder.add_source(File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false)),
        };
        let builder = sources::add_environment(builder)?;
        let builder = sources::add_legacy_root(builder)?;

        builder.build()?.try_deserialize()
    }
}
