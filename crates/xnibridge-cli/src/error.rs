//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core errors to exit codes and user-facing messages.

use std::sync::Arc;

use thiserror::Error;
use xnibridge_core::{BridgeError, BridgeUnavailable, ManifestError, SettingsError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The manifest could not be read or parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Settings from the environment or flags are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] SettingsError),

    /// The declared library is not supported.
    #[error(transparent)]
    Unavailable(Arc<BridgeUnavailable>),

    /// The report could not be written.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h:
    /// - 66: manifest missing or unreadable (`EX_NOINPUT`)
    /// - 69: library unsupported (`EX_UNAVAILABLE`)
    /// - 74: output failure (`EX_IOERR`)
    /// - 78: bad configuration (`EX_CONFIG`)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Manifest(_) => 66,
            Self::Unavailable(_) => 69,
            Self::Output(_) => 74,
            Self::Config(_) => 78,
        }
    }
}

impl From<BridgeError> for CliError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Unavailable(unavailable) => Self::Unavailable(unavailable),
            BridgeError::Settings(settings) => Self::Config(settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xnibridge_core::UnavailableCause;

    #[test]
    fn test_exit_codes() {
        let unavailable = CliError::from(BridgeError::from(BridgeUnavailable {
            library: "Xerces-J".to_string(),
            attempted: vec![],
            cause: UnavailableCause::NoCandidates,
        }));
        assert_eq!(unavailable.exit_code(), 69);

        let config = CliError::from(BridgeError::Settings(SettingsError::EmptyCandidate));
        assert_eq!(config.exit_code(), 78);

        assert_eq!(CliError::Output("closed".to_string()).exit_code(), 74);
    }
}
