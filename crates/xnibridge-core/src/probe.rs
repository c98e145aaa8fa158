//! Capability probe for the loaded pipeline library.
//!
//! The probe runs once per bridge construction. It asks the library for its
//! version, checks that version against the descriptor's range, then checks
//! the declared interface shape. Any failure is reported as a single
//! [`UnsupportedEnvironment`] with the failing check attached.

use semver::Version;
use serde::Serialize;
use tracing::{debug, warn};

use crate::capabilities::{CapabilityDescriptor, PipelineCapabilities};
use crate::error::{UnsupportedEnvironment, UnsupportedReason};
use crate::ports::PipelineLibrary;

/// What a successful probe established about the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    /// Library name as reported.
    pub library: String,
    /// Version string exactly as the accessor returned it.
    pub raw_version: String,
    /// Numeric version extracted from `raw_version`.
    pub version: Version,
    /// Capabilities the library advertised.
    pub capabilities: PipelineCapabilities,
}

/// Check `library` against `descriptor`.
///
/// Side-effect free apart from logging. For a given library state the outcome
/// is always the same.
pub fn probe(
    library: &dyn PipelineLibrary,
    descriptor: &CapabilityDescriptor,
) -> Result<ProbeReport, UnsupportedEnvironment> {
    let name = library.name();
    debug!(
        library = name,
        version_req = %descriptor.version_req,
        required = ?descriptor.required,
        "Probing pipeline library"
    );

    let raw_version = library
        .version()
        .map_err(|err| reject(name, UnsupportedReason::VersionAccessorFailed(err)))?;

    let Some(version) = parse_reported_version(&raw_version) else {
        return Err(reject(name, UnsupportedReason::UnrecognizedVersion(raw_version)));
    };

    if !descriptor.version_req.matches(&version) {
        return Err(reject(
            name,
            UnsupportedReason::VersionMismatch {
                found: version,
                required: descriptor.version_req.clone(),
            },
        ));
    }

    let capabilities = library.capabilities();
    let missing = descriptor.missing_from(capabilities);
    if !missing.is_empty() {
        return Err(reject(name, UnsupportedReason::MissingCapabilities(missing)));
    }

    debug!(library = name, %version, "Pipeline library supported");

    Ok(ProbeReport {
        library: name.to_string(),
        raw_version,
        version,
        capabilities,
    })
}

fn reject(library: &str, reason: UnsupportedReason) -> UnsupportedEnvironment {
    warn!(library, %reason, "Pipeline library rejected");
    UnsupportedEnvironment::new(library, reason)
}

/// Extract a numeric version from a library's self-reported version string.
///
/// Libraries report versions like `"Xerces-J 2.9.1"` or `"2.11.0-xml-schema-1.1"`.
/// The first whitespace-separated token that starts with a digit (optionally
/// after a `v`) wins; if there is none, the first digit anywhere is used.
/// Missing components default to zero and anything after the patch number
/// is ignored.
pub fn parse_reported_version(raw: &str) -> Option<Version> {
    let token = raw
        .split_whitespace()
        .map(|t| t.trim_start_matches(['v', 'V']))
        .find(|t| t.starts_with(|c: char| c.is_ascii_digit()));

    match token {
        Some(token) => leading_version(token),
        None => raw
            .find(|c: char| c.is_ascii_digit())
            .and_then(|start| leading_version(&raw[start..])),
    }
}

fn leading_version(text: &str) -> Option<Version> {
    let mut parts = [0u64; 3];
    let mut count = 0;

    for segment in text.split('.') {
        let end = segment
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(segment.len());
        if end == 0 {
            break;
        }
        parts[count] = segment[..end].parse().ok()?;
        count += 1;
        if count == parts.len() || end != segment.len() {
            break;
        }
    }

    if count == 0 {
        return None;
    }
    Some(Version::new(parts[0], parts[1], parts[2]))
}
