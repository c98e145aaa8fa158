#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
//! Command-line front end for `xnibridge`.
//!
//! Runs the bridge's capability probe against a declared pipeline library
//! so deployments can fail a startup health check instead of failing later.

// Used by main.rs binary
use dotenvy as _;
use tracing_subscriber as _;

#[cfg(test)]
use tempfile as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::{CheckArgs, Commands};
pub use error::CliError;
pub use parser::Cli;
