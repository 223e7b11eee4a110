//! dualgrid - an in-memory table whose cells sit on two chains at once
//!
//! This is the root crate that provides workspace-level documentation.
//! The implementation lives in `dualgrid-core`, re-exported here.

pub use dualgrid_core::*;

/// Returns the version of the package.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
