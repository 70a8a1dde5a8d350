//! Pointer input for the turntable.

/// One-dimensional drag tracking over mouse and touch.
pub mod drag;
