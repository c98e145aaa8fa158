//! Integration tests for the process-wide access point on a supported library.
//!
//! The global can only be installed once per process, so everything that
//! touches it lives in a single test.

use std::sync::Arc;
use std::thread;

use xnibridge_core::{
    BridgeSelector, CapabilityDescriptor, LibraryManifest, PipelineCapabilities, PipelineLibrary,
    initialize, is_initialized, shared,
};

fn library(version: &str) -> Arc<dyn PipelineLibrary> {
    Arc::new(LibraryManifest::new(
        "Xerces-J",
        Some(version),
        PipelineCapabilities::DECLARE_PREFIX | PipelineCapabilities::START_DOCUMENT_NS_CONTEXT,
    ))
}

#[test]
fn test_shared_bridge_lifecycle() {
    assert!(!is_initialized());
    assert!(shared().is_none());

    let first = initialize(
        library("2.5.0"),
        &CapabilityDescriptor::baseline(),
        &BridgeSelector::new(),
    )
    .unwrap();
    assert_eq!(first.version().unwrap(), "2.5.0");
    assert!(is_initialized());

    // Later initialization never replaces the installed instance.
    let again = initialize(
        library("2.9.1"),
        &CapabilityDescriptor::baseline(),
        &BridgeSelector::new(),
    )
    .unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(again.version().unwrap(), "2.5.0");

    for _ in 0..10 {
        let current = shared().unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &current));
    }

    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| shared().unwrap().unwrap()))
        .collect();
    for handle in handles {
        let from_thread = handle.join().unwrap();
        assert!(Arc::ptr_eq(&first, &from_thread));
        assert_eq!(from_thread.version().unwrap(), "2.5.0");
    }
}
