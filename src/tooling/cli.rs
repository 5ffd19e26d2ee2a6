//! CLI Tooling
//!
//! Command-line interface over the catalog. Every lookup command prints the
//! same structured record the HTTP boundary serves for `.json` paths.

use crate::catalog::Catalog;
use crate::config::{CatalogConfig, ConfigLoader, ServerConfig};
use crate::error::CatalogError;
use crate::logging::LoggingConfig;
use crate::routes;
use crate::server;
use crate::types::EntityId;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Directory catalog CLI - browse a content tree as repositories, collections and files
#[derive(Parser)]
#[command(name = "dircatalog")]
#[command(about = "Read-only catalog over an on-disk content tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Content root (directory containing `repositories/`)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line logging overrides on top of the loaded settings.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the catalog over HTTP
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
        /// Worker threads (overrides server.workers)
        #[arg(long)]
        workers: Option<usize>,
    },
    /// List all repositories
    Repositories,
    /// Show one repository with its collections
    Repository { id: EntityId },
    /// List all collections
    Collections,
    /// Show one collection with its file groups
    Collection { id: EntityId },
    /// Show one file group
    FileGroup { id: EntityId },
    /// Show one directory with its immediate children
    Directory { id: EntityId },
    /// Show the full subtree beneath a directory
    Tree { id: EntityId },
    /// Show one file
    File { id: EntityId },
    /// Resolve a UUID to its canonical path
    Uuid { uuid: String },
    /// Answer a request path as the HTTP server would
    Get { path: String },
}

/// CLI context for executing commands
pub struct CliContext {
    config: CatalogConfig,
    catalog: Arc<Catalog>,
}

impl CliContext {
    /// Load configuration and open the catalog. `root` overrides the
    /// configured content root.
    pub fn new(root: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self, CatalogError> {
        let mut config = ConfigLoader::load(config_path.as_deref())?;
        if let Some(root) = root {
            config.content.root = root;
        }
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: CatalogConfig) -> Self {
        let catalog = Arc::new(Catalog::from_config(&config));
        Self { config, catalog }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, CatalogError> {
        let catalog = self.catalog.as_ref();
        match command {
            Commands::Serve { bind, workers } => {
                let server_config = ServerConfig {
                    bind: bind.clone().unwrap_or_else(|| self.config.server.bind.clone()),
                    workers: workers.unwrap_or(self.config.server.workers),
                };
                server::serve(Arc::clone(&self.catalog), &server_config)?;
                Ok(format!("Server on {} stopped", server_config.bind))
            }
            Commands::Repositories => to_json(&catalog.repositories()),
            Commands::Repository { id } => to_json(&catalog.repository(*id)?),
            Commands::Collections => to_json(&catalog.collections()),
            Commands::Collection { id } => to_json(&catalog.collection(*id)?),
            Commands::FileGroup { id } => to_json(&catalog.file_group(*id)?),
            Commands::Directory { id } => to_json(&catalog.directory(*id)?),
            Commands::Tree { id } => {
                let tree = catalog.directory_tree(*id)?;
                info!(
                    id,
                    directories = tree.descendant_directory_count(),
                    files = tree.descendant_file_count(),
                    "Assembled tree"
                );
                to_json(&tree)
            }
            Commands::File { id } => to_json(&catalog.file(*id)?),
            Commands::Uuid { uuid } => catalog.path_for_uuid(uuid),
            Commands::Get { path } => Ok(format_response(&routes::dispatch(catalog, path))),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CatalogError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Status line, optional Location, blank line, body.
fn format_response(response: &routes::Response) -> String {
    let mut out = format!("HTTP {}\n", response.status);
    if let Some(content_type) = response.content_type {
        out.push_str(&format!("Content-Type: {}\n", content_type));
    }
    if let Some(location) = &response.location {
        out.push_str(&format!("Location: {}\n", location));
    }
    out.push('\n');
    out.push_str(&response.body);
    out
}
