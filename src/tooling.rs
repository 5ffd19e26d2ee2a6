//! Tooling & Integration Layer
//!
//! Command-line entry points over the catalog and the HTTP boundary.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
