use bevy::prelude::*;

pub const FOV_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 1000.0;

/// Default eye position framing the product at the origin.
pub const EYE_POSITION: Vec3 = Vec3::new(2.0, 2.0, 2.0);

/// Blend factor of the per-tick low-pass filter on drag rotation.
pub const ROTATION_BLEND_FACTOR: f32 = 0.1;

/// Horizontal drag pixels to turntable yaw radians.
pub const DRAG_TO_YAW: f32 = 0.01;

/// Idle auto-spin applied while no drag is active, radians per second.
pub const IDLE_SPIN_RATE: f32 = 0.3;

/// Portrait viewports pull the camera back so the model stays framed.
pub const PORTRAIT_FRAMING_MAX: f32 = 2.0;

pub const KEY_LIGHT_ILLUMINANCE: f32 = 4_000.0;
pub const ENVIRONMENT_INTENSITY: f32 = 900.0;
