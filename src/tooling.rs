//! Tooling & Integration Layer
//!
//! Command-line surface over the product store.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, ProductInput};
