//! Declared pipeline library manifests.
//!
//! A manifest states which pipeline library a deployment is linked against:
//! its name, reported version and capability flags. Loading one gives a
//! [`PipelineLibrary`] that can be health-checked at startup without the
//! library itself being present.
//!
//! ```json
//! {
//!   "name": "Xerces-J",
//!   "version": "Xerces-J 2.9.1",
//!   "capabilities": "DECLARE_PREFIX | START_DOCUMENT_NS_CONTEXT"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::capabilities::PipelineCapabilities;
use crate::ports::{PipelineError, PipelineLibrary, PipelineResult};

/// Errors loading a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A pipeline library described by data rather than linked code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryManifest {
    pub name: String,

    /// Reported version. Absent means the version accessor is unavailable.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub capabilities: PipelineCapabilities,
}

impl LibraryManifest {
    pub fn new(
        name: impl Into<String>,
        version: Option<&str>,
        capabilities: PipelineCapabilities,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.map(str::to_string),
            capabilities,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_json_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), library = %manifest.name, "Loaded library manifest");
        Ok(manifest)
    }
}

impl PipelineLibrary for LibraryManifest {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> PipelineResult<String> {
        self.version.clone().ok_or_else(|| {
            PipelineError::VersionUnavailable(format!("{} does not declare a version", self.name))
        })
    }

    fn capabilities(&self) -> PipelineCapabilities {
        self.capabilities
    }
}
