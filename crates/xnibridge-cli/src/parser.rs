//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for checking pipeline library compatibility.
#[derive(Parser)]
#[command(name = "xnibridge")]
#[command(about = "Check that a pipeline library is supported by the bridge")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;
    use xnibridge_core::{PipelineCapabilities, SelectionMode};

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_args() {
        let cli = Cli::parse_from([
            "xnibridge",
            "--verbose",
            "check",
            "--manifest",
            "/etc/xnibridge/xerces.json",
            "--version-req",
            ">=2.9",
            "--mode",
            "verify-then-construct",
            "--require",
            "START_DOCUMENT_NS_CONTEXT",
            "--json",
        ]);
        assert!(cli.verbose);

        let Some(Commands::Check(args)) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.manifest, PathBuf::from("/etc/xnibridge/xerces.json"));
        assert_eq!(args.version_req.as_deref(), Some(">=2.9"));
        assert_eq!(args.candidate, None);
        assert_eq!(args.mode, Some(SelectionMode::VerifyThenConstruct));
        assert_eq!(
            args.require,
            Some(PipelineCapabilities::START_DOCUMENT_NS_CONTEXT)
        );
        assert!(args.json);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let result = Cli::try_parse_from([
            "xnibridge",
            "check",
            "--manifest",
            "lib.json",
            "--mode",
            "twice",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_flags_fall_back_to_environment() {
        let cmd = Cli::command();
        let check = cmd.find_subcommand("check").unwrap();
        let env_of = |id: &str| {
            check
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };

        assert_eq!(env_of("version_req").as_deref(), Some("XNIBRIDGE_VERSION_REQ"));
        assert_eq!(env_of("candidate").as_deref(), Some("XNIBRIDGE_CANDIDATE"));
        assert_eq!(env_of("mode").as_deref(), Some("XNIBRIDGE_SELECTION_MODE"));
        assert_eq!(
            env_of("require").as_deref(),
            Some("XNIBRIDGE_REQUIRED_CAPABILITIES")
        );
        assert_eq!(env_of("manifest"), None);
    }

    #[test]
    fn test_candidates_command() {
        let cli = Cli::parse_from(["xnibridge", "candidates"]);
        assert!(matches!(cli.command, Some(Commands::Candidates)));
    }
}
