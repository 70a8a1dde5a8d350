//! Progressive reveal of the configured product.
//!
//! A reveal is a sequence of groups, each naming the full set of parts
//! visible while it is active. Moving between groups diffs the two sets and
//! animates only the delta.

/// Scripted animation tasks and the per-tick system advancing them.
pub mod animation;

/// ECS application of transition plans plus navigation input handling.
pub mod apply;

/// Group table configuration and its fail-fast validation.
pub mod groups;

/// Reveal cursor and clamped advance/retreat bookkeeping.
pub mod navigation;

/// Part identity and the immutable base snapshots taken at ingestion.
pub mod parts;

/// Pure group-visibility diffing: which parts appear, disappear, restore.
pub mod transition;
