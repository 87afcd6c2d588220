//! Common test utilities for integration tests.
//!
//! This module provides application root fixtures and small helpers for
//! testing the vpath library.

use std::sync::Arc;

use vpath::{AppRoot, SharedAppRoot, StaticAppRoot, UnknownAppRoot, VirtualPath};

/// An application root fixed at `raw`.
#[allow(dead_code)]
pub fn static_root(raw: &str) -> AppRoot {
    StaticAppRoot::new(raw).unwrap().shared()
}

/// An application root that is never known.
#[allow(dead_code)]
pub fn unknown_root() -> AppRoot {
    Arc::new(UnknownAppRoot)
}

/// A replaceable application root, returned both as the concrete provider
/// (to change it) and as a handle (to build paths with).
#[allow(dead_code)]
pub fn shared_root() -> (Arc<SharedAppRoot>, AppRoot) {
    let provider = Arc::new(SharedAppRoot::new());
    let handle: AppRoot = provider.clone();
    (provider, handle)
}

/// Create a path of any form, panicking on invalid input.
#[allow(dead_code)]
pub fn any_path(raw: &str, root: &AppRoot) -> VirtualPath {
    VirtualPath::create_any(raw, root)
        .unwrap_or_else(|e| panic!("failed to create virtual path '{raw}': {e}"))
}

/// Resolve `path` to its absolute string, panicking if that fails.
#[allow(dead_code)]
pub fn absolute(path: &VirtualPath) -> String {
    path.absolute()
        .unwrap_or_else(|e| panic!("failed to resolve {path:?}: {e}"))
        .to_string()
}
