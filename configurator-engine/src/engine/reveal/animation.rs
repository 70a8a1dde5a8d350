use bevy::prelude::*;

use constants::animation::{
    FLY_HEIGHT, FLY_IN_DURATION, FLY_OUT_DURATION, POP_IN_SCALE, WIGGLE_ANGLE_DEGREES,
    WIGGLE_LEG_DURATION,
};

use crate::rpc::web_rpc::WebRpcInterface;

use super::parts::Part;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Accelerating, for departures.
    QuadIn,
    /// Decelerating, for arrivals.
    QuadOut,
    /// Symmetric, for the intro wiggle.
    QuadInOut,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Drives translation.y toward the base position. No post-condition.
    FlyIn,
    /// Drives translation.y away from the base position; visibility is
    /// cleared when the task completes, not before.
    FlyOut,
    /// Drives uniform scale.
    ScalePulse,
    /// Drives yaw, in radians. Used by the intro wiggle timeline.
    Yaw,
}

/// One scripted numeric animation: start value, end value, duration,
/// elapsed time. Tasks are plain records advanced once per tick by the
/// schedule; there are no completion closures.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTask {
    pub kind: TaskKind,
    start: f32,
    end: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl AnimationTask {
    pub fn new(kind: TaskKind, start: f32, end: f32, duration: f32, easing: Easing) -> Self {
        Self {
            kind,
            start,
            end,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Appearing part: drop from one unit above the base height.
    pub fn fly_in(base_y: f32) -> Self {
        Self::new(TaskKind::FlyIn, base_y + FLY_HEIGHT, base_y, FLY_IN_DURATION, Easing::QuadOut)
    }

    /// Disappearing part: lift one unit above the base height, then hide.
    pub fn fly_out(base_y: f32) -> Self {
        Self::new(TaskKind::FlyOut, base_y, base_y + FLY_HEIGHT, FLY_OUT_DURATION, Easing::QuadIn)
    }

    /// Appearing part settles from slightly oversized to natural scale.
    pub fn scale_pulse() -> Self {
        Self::new(TaskKind::ScalePulse, POP_IN_SCALE, 1.0, FLY_IN_DURATION, Easing::QuadOut)
    }

    /// Advance by `dt` and return the current eased value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.start + (self.end - self.start) * self.easing.sample(t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Active tasks on one part. Transitions append; newer tasks are applied
/// after older ones each tick, so an overlapping transition is
/// last-writer-wins on the animated property. Nothing is cancelled.
#[derive(Component, Debug, Default)]
pub struct PartAnimations(pub Vec<AnimationTask>);

/// Advance every active part task once per tick. The only post-condition
/// evaluated at completion is the fly-out hiding its part.
pub fn advance_part_animations(
    time: Res<Time>,
    mut parts: Query<(&mut Transform, &mut Visibility, &mut PartAnimations), With<Part>>,
) {
    let dt = time.delta_secs();
    for (mut transform, mut visibility, mut animations) in &mut parts {
        if animations.0.is_empty() {
            continue;
        }
        for task in animations.0.iter_mut() {
            let value = task.advance(dt);
            match task.kind {
                TaskKind::FlyIn | TaskKind::FlyOut => transform.translation.y = value,
                TaskKind::ScalePulse => transform.scale = Vec3::splat(value),
                TaskKind::Yaw => transform.rotation = Quat::from_rotation_y(value),
            }
            if task.finished() && task.kind == TaskKind::FlyOut {
                *visibility = Visibility::Hidden;
            }
        }
        animations.0.retain(|task| !task.finished());
    }
}

/// Intermediate pivot between the turntable rig and the glTF scene; the
/// intro wiggle rotates this so it composes with the drag yaw.
#[derive(Component)]
pub struct WigglePivot;

/// Scripted launch timeline: the model swings +15deg, back, -15deg, back,
/// inviting the first drag. Runs once; the component is removed when the
/// last leg completes.
#[derive(Component, Debug)]
pub struct IntroWiggle {
    legs: Vec<AnimationTask>,
    current: usize,
}

impl IntroWiggle {
    pub fn timeline() -> Self {
        let amplitude = WIGGLE_ANGLE_DEGREES.to_radians();
        let leg = |from: f32, to: f32| {
            AnimationTask::new(TaskKind::Yaw, from, to, WIGGLE_LEG_DURATION, Easing::QuadInOut)
        };
        Self {
            legs: vec![
                leg(0.0, amplitude),
                leg(amplitude, 0.0),
                leg(0.0, -amplitude),
                leg(-amplitude, 0.0),
            ],
            current: 0,
        }
    }

    /// Advance the active leg; returns the yaw to apply, or `None` once the
    /// timeline is exhausted.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        let leg = self.legs.get_mut(self.current)?;
        let value = leg.advance(dt);
        if leg.finished() {
            self.current += 1;
        }
        Some(value)
    }

    pub fn finished(&self) -> bool {
        self.current >= self.legs.len()
    }
}

/// Drive the intro wiggle and tell the host when it ends so it can hide
/// its rotation hint.
pub fn advance_intro_wiggle(
    time: Res<Time>,
    mut commands: Commands,
    mut rpc: ResMut<WebRpcInterface>,
    mut pivots: Query<(Entity, &mut Transform, &mut IntroWiggle), With<WigglePivot>>,
) {
    for (entity, mut transform, mut wiggle) in &mut pivots {
        if let Some(yaw) = wiggle.advance(time.delta_secs()) {
            transform.rotation = Quat::from_rotation_y(yaw);
        }
        if wiggle.finished() {
            transform.rotation = Quat::IDENTITY;
            commands.entity(entity).remove::<IntroWiggle>();
            rpc.send_notification("reveal/introFinished", serde_json::json!({}));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_exact_endpoints() {
        for easing in [Easing::QuadIn, Easing::QuadOut, Easing::QuadInOut] {
            assert_eq!(easing.sample(0.0), 0.0, "{:?} start", easing);
            assert_eq!(easing.sample(1.0), 1.0, "{:?} end", easing);
        }
    }

    #[test]
    fn quad_out_decelerates_and_quad_in_accelerates() {
        assert!(Easing::QuadOut.sample(0.5) > 0.5);
        assert!(Easing::QuadIn.sample(0.5) < 0.5);
    }

    #[test]
    fn fly_in_starts_above_base_and_lands_on_it() {
        let mut task = AnimationTask::fly_in(2.0);
        assert_eq!(task.value(), 3.0);
        task.advance(FLY_IN_DURATION);
        assert!(task.finished());
        assert_eq!(task.value(), 2.0);
    }

    #[test]
    fn fly_out_ends_one_unit_above_base() {
        let mut task = AnimationTask::fly_out(-1.0);
        assert_eq!(task.value(), -1.0);
        task.advance(FLY_OUT_DURATION * 10.0);
        assert!(task.finished());
        assert_eq!(task.value(), 0.0);
    }

    #[test]
    fn elapsed_clamps_at_duration() {
        let mut task = AnimationTask::scale_pulse();
        assert_eq!(task.value(), POP_IN_SCALE);
        let settled = task.advance(1_000.0);
        assert_eq!(settled, 1.0);
        assert_eq!(task.advance(1.0), 1.0, "value is stable after completion");
    }

    #[test]
    fn partial_advance_is_between_endpoints() {
        let mut task = AnimationTask::fly_in(0.0);
        let mid = task.advance(FLY_IN_DURATION * 0.5);
        assert!(mid > 0.0 && mid < 1.0);
        assert!(!task.finished());
    }

    #[test]
    fn wiggle_timeline_returns_to_rest() {
        let mut wiggle = IntroWiggle::timeline();
        let mut last = 0.0;
        // Four legs of 0.5s each; step well past the end.
        for _ in 0..100 {
            match wiggle.advance(0.05) {
                Some(value) => last = value,
                None => break,
            }
        }
        assert!(wiggle.finished());
        assert_eq!(last, 0.0, "final leg must land back on zero yaw");
    }
}
