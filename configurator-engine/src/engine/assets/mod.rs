//! External configuration assets.

/// JSON scene manifest: resource batch plus the reveal group table.
pub mod scene_manifest;
