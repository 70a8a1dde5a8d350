use bevy::prelude::*;

/// Vertical travel of a part during fly-in/fly-out, in scene units.
pub const FLY_HEIGHT: f32 = 1.0;

/// Fly-in runs slower than fly-out so arrivals read as deliberate.
pub const FLY_IN_DURATION: f32 = 1.5;
pub const FLY_OUT_DURATION: f32 = 1.0;

/// Newly revealed parts pop in slightly oversized and settle to 1.0.
pub const POP_IN_SCALE: f32 = 1.2;

/// Colour override for parts that just entered the active group.
pub const HIGHLIGHT_COLOUR: Color = Color::srgb(0.0, 1.0, 0.0);

/// Intro wiggle: one leg per quarter swing, amplitude in degrees.
pub const WIGGLE_LEG_DURATION: f32 = 0.5;
pub const WIGGLE_ANGLE_DEGREES: f32 = 15.0;
