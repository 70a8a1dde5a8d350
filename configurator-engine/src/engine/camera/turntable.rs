use bevy::{prelude::*, window::WindowResized};

use constants::camera::{
    DRAG_TO_YAW, EYE_POSITION, IDLE_SPIN_RATE, PORTRAIT_FRAMING_MAX, ROTATION_BLEND_FACTOR,
};

use crate::engine::input::drag::{DragActiveChanged, DragController};

/// Root of the model hierarchy; the turntable yaw is applied here. The
/// intro wiggle sits on a child pivot so the two rotations compose.
#[derive(Component)]
pub struct ModelRig;

/// Smoothed rotation state. `smoothed_yaw` chases `target_yaw` with a fixed
/// blend factor each tick, a low-pass filter rather than a simulation.
#[derive(Resource, Debug)]
pub struct TurntableCamera {
    pub smoothed_yaw: f32,
    pub target_yaw: f32,
    pub idle_spin: f32,
    pub interactive: bool,
}

impl Default for TurntableCamera {
    fn default() -> Self {
        Self {
            smoothed_yaw: 0.0,
            target_yaw: 0.0,
            idle_spin: 0.0,
            interactive: false,
        }
    }
}

/// One step of the per-tick recurrence: current + (target - current) * factor.
pub fn blend_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Chase the drag position and, while no drag is active, keep the model
/// slowly spinning.
pub fn turntable_update(
    time: Res<Time>,
    drag: Res<DragController>,
    mut drag_events: EventReader<DragActiveChanged>,
    mut camera: ResMut<TurntableCamera>,
    mut rigs: Query<&mut Transform, With<ModelRig>>,
) {
    for event in drag_events.read() {
        camera.interactive = event.active;
    }

    camera.target_yaw = drag.state.position * DRAG_TO_YAW;
    camera.smoothed_yaw = blend_toward(camera.smoothed_yaw, camera.target_yaw, ROTATION_BLEND_FACTOR);

    if !camera.interactive {
        camera.idle_spin += IDLE_SPIN_RATE * time.delta_secs();
    }

    let yaw = camera.smoothed_yaw + camera.idle_spin;
    for mut transform in &mut rigs {
        transform.rotation = Quat::from_rotation_y(yaw);
    }
}

/// Keep the product framed when the host resizes the surface. Bevy updates
/// the projection aspect itself; this pulls the eye back on narrow
/// (portrait) viewports so the model does not clip the frame edges.
pub fn responsive_framing(
    mut resize_events: EventReader<WindowResized>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Some(resized) = resize_events.read().last() else {
        return;
    };
    if resized.height <= 0.0 {
        return;
    }

    let aspect = resized.width / resized.height;
    let backoff = (1.0 / aspect).clamp(1.0, PORTRAIT_FRAMING_MAX);

    for mut transform in &mut cameras {
        *transform =
            Transform::from_translation(EYE_POSITION * backoff).looking_at(Vec3::ZERO, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_converges_on_target() {
        let mut value = 0.0;
        for _ in 0..200 {
            value = blend_toward(value, 1.0, ROTATION_BLEND_FACTOR);
        }
        assert!((value - 1.0).abs() < 1e-3, "smoothed value settled at {}", value);
    }

    #[test]
    fn blend_moves_a_fixed_fraction_per_tick() {
        let stepped = blend_toward(0.0, 10.0, 0.1);
        assert!((stepped - 1.0).abs() < 1e-6);
        let stepped = blend_toward(stepped, 10.0, 0.1);
        assert!((stepped - 1.9).abs() < 1e-6);
    }

    #[test]
    fn blend_is_stable_at_the_target() {
        assert_eq!(blend_toward(5.0, 5.0, 0.1), 5.0);
    }
}
