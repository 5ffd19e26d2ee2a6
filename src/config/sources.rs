//! Environment sources: DIRCATALOG_ prefix with __ separator, plus the
//! legacy REPOSITORY_ROOT variable.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};

pub const ENV_PREFIX: &str = "DIRCATALOG";
pub const LEGACY_ROOT_VAR: &str = "REPOSITORY_ROOT";

/// Add environment variable overlay to builder.
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("content.ignored_files")
            .with_list_parse_key("repository.list_hidden_keys")
            .with_list_parse_key("repository.detail_hidden_keys"),
    ))
}

/// `REPOSITORY_ROOT` overrides `content.root` when set and non-empty.
pub fn add_legacy_root(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match std::env::var(LEGACY_ROOT_VAR) {
        Ok(root) if !root.is_empty() => builder.set_override("content.root", root),
        _ => Ok(builder),
    }
}
