//! Camera rig and interactive rotation.

/// Smoothed drag-driven turntable plus responsive reframing on resize.
pub mod turntable;
