//! Pipeline capability flags and the descriptor the probe checks against.
//!
//! Libraries declare their interface shape up front instead of having it
//! discovered by introspection. The bridge targets a single major version
//! of the pipeline API; anything outside that range fails the probe.
//!
//! # Invariant
//!
//! A descriptor is pure data. It is derived once per construction and never
//! mutated afterwards.

use bitflags::bitflags;
use semver::{Comparator, Op, Prerelease, VersionReq};
use serde::{Deserialize, Serialize};

/// Major version of the pipeline API this bridge is written against.
pub const TARGET_MAJOR_VERSION: u64 = 2;

/// Textual form of the baseline version requirement.
pub const BASELINE_VERSION_REQUIREMENT: &str = ">=2.3.0, <3.0.0";

bitflags! {
    /// Interface features a pipeline library build exposes.
    ///
    /// Serialized as the `|`-separated flag names, e.g.
    /// `"DECLARE_PREFIX | START_DOCUMENT_NS_CONTEXT"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PipelineCapabilities: u32 {
        /// The namespace context declares prefixes with a `(prefix, uri)` pair.
        const DECLARE_PREFIX            = 0b0000_0001;

        /// `start_document` receives the namespace context.
        const START_DOCUMENT_NS_CONTEXT = 0b0000_0010;
    }
}

impl Default for PipelineCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl PipelineCapabilities {
    /// Check if the namespace context supports two-argument prefix declaration.
    pub const fn declares_prefixes(self) -> bool {
        self.contains(Self::DECLARE_PREFIX)
    }
}

/// What a library must offer for the bridge to bind to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    /// Flags the library must advertise.
    pub required: PipelineCapabilities,
    /// Range the library's reported version must fall into.
    pub version_req: VersionReq,
}

impl CapabilityDescriptor {
    pub const fn new(required: PipelineCapabilities, version_req: VersionReq) -> Self {
        Self {
            required,
            version_req,
        }
    }

    /// The requirement the built-in bridge was written for.
    pub fn baseline() -> Self {
        Self::new(PipelineCapabilities::DECLARE_PREFIX, baseline_requirement())
    }

    /// Also require `extra`. Prefix declaration stays required.
    #[must_use]
    pub fn requiring(mut self, extra: PipelineCapabilities) -> Self {
        self.required |= extra;
        self
    }

    /// Required flags absent from `available`.
    pub fn missing_from(&self, available: PipelineCapabilities) -> PipelineCapabilities {
        self.required.difference(available)
    }
}

impl Default for CapabilityDescriptor {
    fn default() -> Self {
        Self::baseline()
    }
}

fn baseline_requirement() -> VersionReq {
    VersionReq {
        comparators: vec![
            Comparator {
                op: Op::GreaterEq,
                major: TARGET_MAJOR_VERSION,
                minor: Some(3),
                patch: Some(0),
                pre: Prerelease::EMPTY,
            },
            Comparator {
                op: Op::Less,
                major: TARGET_MAJOR_VERSION + 1,
                minor: Some(0),
                patch: Some(0),
                pre: Prerelease::EMPTY,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capabilities_empty() {
        assert!(PipelineCapabilities::default().is_empty());
    }

    #[test]
    fn test_baseline_matches_textual_requirement() {
        let baseline = CapabilityDescriptor::baseline();
        assert_eq!(
            baseline.version_req,
            VersionReq::parse(BASELINE_VERSION_REQUIREMENT).unwrap()
        );
        assert_eq!(baseline.required, PipelineCapabilities::DECLARE_PREFIX);
    }

    #[test]
    fn test_missing_from() {
        let descriptor = CapabilityDescriptor::new(
            PipelineCapabilities::DECLARE_PREFIX | PipelineCapabilities::START_DOCUMENT_NS_CONTEXT,
            VersionReq::STAR,
        );

        let missing = descriptor.missing_from(PipelineCapabilities::START_DOCUMENT_NS_CONTEXT);
        assert_eq!(missing, PipelineCapabilities::DECLARE_PREFIX);

        let none = descriptor.missing_from(PipelineCapabilities::all());
        assert!(none.is_empty());
    }

    #[test]
    fn test_capabilities_deserialize_from_flag_names() {
        let caps: PipelineCapabilities =
            serde_json::from_str("\"DECLARE_PREFIX | START_DOCUMENT_NS_CONTEXT\"").unwrap();
        assert!(caps.declares_prefixes());
        assert!(caps.contains(PipelineCapabilities::START_DOCUMENT_NS_CONTEXT));
    }

    #[test]
    fn test_requiring_keeps_prefix_declaration() {
        let descriptor = CapabilityDescriptor::baseline()
            .requiring(PipelineCapabilities::START_DOCUMENT_NS_CONTEXT);
        assert_eq!(descriptor.required, PipelineCapabilities::all());

        let missing = descriptor.missing_from(PipelineCapabilities::DECLARE_PREFIX);
        assert_eq!(missing, PipelineCapabilities::START_DOCUMENT_NS_CONTEXT);
    }

    #[test]
    fn test_capabilities_reject_unknown_flag() {
        let result: Result<PipelineCapabilities, _> =
            serde_json::from_str("\"DECLARE_PREFIX | PREFIX_MAPPING_EVENTS\"");
        assert!(result.is_err());
    }
}
