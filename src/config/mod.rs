//! Configuration
//!
//! Layered with the `config` crate: serialized defaults, then an optional
//! configuration file, then `DIRCATALOG__*` environment variables, then the
//! `REPOSITORY_ROOT` variable for the content root.

mod facade;
mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_sidecar_file() -> String {
    "info.yml".to_string()
}

fn default_root_directory_name() -> String {
    "root".to_string()
}

fn default_ignored_files() -> Vec<String> {
    vec![
        ".DS_Store".to_string(),
        ".keep".to_string(),
        "Thumbs.db".to_string(),
    ]
}

fn default_on_disk_storage_level() -> String {
    "bit_level".to_string()
}

/// Content tree layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory containing `repositories/`
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Sidecar metadata file name inside entity directories
    #[serde(default = "default_sidecar_file")]
    pub sidecar_file: String,

    /// Name of the directory holding a FileGroup's on-disk content
    #[serde(default = "default_root_directory_name")]
    pub root_directory_name: String,

    /// Housekeeping names that never appear as File nodes
    #[serde(default = "default_ignored_files")]
    pub ignored_files: Vec<String>,

    /// `storage_level` value marking FileGroups mirrored on disk
    #[serde(default = "default_on_disk_storage_level")]
    pub on_disk_storage_level: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            sidecar_file: default_sidecar_file(),
            root_directory_name: default_root_directory_name(),
            ignored_files: default_ignored_files(),
            on_disk_storage_level: default_on_disk_storage_level(),
        }
    }
}

fn default_list_hidden_keys() -> Vec<String> {
    vec!["ldap_admin_domain".to_string()]
}

fn default_detail_hidden_keys() -> Vec<String> {
    ["notes", "address_1", "address_2", "city", "state", "zip", "phone_number"]
        .iter()
        .map(|key| key.to_string())
        .collect()
}

/// Sidecar keys withheld from repository records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Removed from entries of the repository listing
    #[serde(default = "default_list_hidden_keys")]
    pub list_hidden_keys: Vec<String>,

    /// Removed from single-repository lookups
    #[serde(default = "default_detail_hidden_keys")]
    pub detail_hidden_keys: Vec<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            list_hidden_keys: default_list_hidden_keys(),
            detail_hidden_keys: default_detail_hidden_keys(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:4567".to_string()
}

fn default_workers() -> usize {
    4
}

/// HTTP boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Request handler threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: default_workers(),
        }
    }
}
