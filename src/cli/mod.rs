//! CLI module
//!
//! Command-line interface for streaming listings.
//!
//! # Commands
//!
//! - `list` - Stream every item of a resource as JSON lines
//! - `resources` - List configured resources
//! - `validate` - Validate the config and every resource contract

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
