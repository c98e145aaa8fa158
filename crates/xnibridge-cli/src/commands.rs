//! Available subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use xnibridge_core::settings::{
    ENV_CANDIDATE, ENV_REQUIRED_CAPABILITIES, ENV_SELECTION_MODE, ENV_VERSION_REQ,
};
use xnibridge_core::{PipelineCapabilities, SelectionMode, parse_capabilities};

#[derive(Subcommand)]
pub enum Commands {
    /// Probe a declared pipeline library and report whether it is supported
    Check(CheckArgs),

    /// List registered bridge candidates
    Candidates,
}

/// Arguments for `check`.
///
/// Each setting falls back to its `XNIBRIDGE_*` environment variable when the
/// flag is absent.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the library manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Semver requirement the library version must satisfy
    #[arg(long = "version-req", env = ENV_VERSION_REQ)]
    pub version_req: Option<String>,

    /// Only try this bridge candidate
    #[arg(long, env = ENV_CANDIDATE)]
    pub candidate: Option<String>,

    /// Selection mode: "single" or "verify-then-construct"
    #[arg(long, env = ENV_SELECTION_MODE)]
    pub mode: Option<SelectionMode>,

    /// Extra capabilities to require, e.g. "START_DOCUMENT_NS_CONTEXT"
    #[arg(long, env = ENV_REQUIRED_CAPABILITIES, value_parser = parse_capabilities)]
    pub require: Option<PipelineCapabilities>,

    /// Print the probe report as JSON
    #[arg(long)]
    pub json: bool,
}
