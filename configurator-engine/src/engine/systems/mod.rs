//! Ambient runtime systems.

/// Frame-rate overlay fed by Bevy's frame time diagnostics.
pub mod fps_tracking;
