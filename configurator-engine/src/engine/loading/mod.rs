//! Startup loading pipeline.
//!
//! Runs manifest parsing, the concurrent resource batch, scene spawning and
//! part ingestion as staged systems with progress tracking. Any failure is
//! terminal: the app moves to `LoadFailed` and no partial scene exists.

/// Scene manifest loading and group-table extraction from JSON.
///
/// Kicks off the resource batch once the manifest is parsed.
pub mod manifest_loader;

/// Part ingestion: stable ids from name tags, base snapshots, initial show.
pub mod model_ingest;

/// Loading progress flags for the staged state transitions.
pub mod progress;

/// Concurrent resource batch (model, environment, textures) with
/// whole-batch failure semantics, plus scene spawning.
pub mod resource_loader;
