//! board-export library
//!
//! Validates board definitions and packs them into the runtime board pack.
//! Used by the `board-export` binary and its integration tests.

pub mod export;
pub mod manifest;

pub use export::{build, check, ExportContext, ExportSummary};
pub use manifest::{BoardsManifest, DEFAULT_MANIFEST};
