//! Dircatalog: Path-Derived Directory Catalog
//!
//! Projects a fixed-layout content tree (repositories, collections, file
//! groups, and the directories and files beneath each file group's root) as a
//! read-only entity graph. Identifiers are derived from relative paths, so
//! nothing is stored and every lookup reflects the tree as it is now.

pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod layout;
pub mod logging;
pub mod overlay;
pub mod routes;
pub mod server;
pub mod tooling;
pub mod types;
pub mod walker;

pub use catalog::Catalog;
pub use error::CatalogError;
