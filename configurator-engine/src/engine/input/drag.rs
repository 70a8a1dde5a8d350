use bevy::{input::touch::Touches, prelude::*, window::PrimaryWindow};

/// Fired on drag start/stop. The camera consumes it synchronously each tick
/// to switch between interactive rotation and idle spin.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragActiveChanged {
    pub active: bool,
}

/// One-dimensional drag arithmetic. `position` accumulates across drags:
/// grabbing captures an offset so the model never jumps under the pointer.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    offset: f32,
    pub position: f32,
}

impl DragState {
    pub fn drag_start(&mut self, pixels: f32) {
        self.dragging = true;
        self.offset = pixels - self.position;
    }

    pub fn drag_move(&mut self, pixels: f32) {
        if self.dragging {
            self.position = pixels - self.offset;
        }
    }

    pub fn drag_stop(&mut self) {
        self.dragging = false;
    }
}

#[derive(Resource, Debug, Default)]
pub struct DragController {
    pub state: DragState,
}

/// Track the primary pointer (left mouse button or first touch) as a
/// horizontal drag over the window.
pub fn drag_input_system(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut controller: ResMut<DragController>,
    mut events: EventWriter<DragActiveChanged>,
) {
    let touch_x = touches.iter().next().map(|touch| touch.position().x);
    let pointer_x = touch_x.or_else(|| {
        windows
            .single()
            .ok()
            .and_then(|window| window.cursor_position())
            .map(|position| position.x)
    });

    let pressed = mouse.pressed(MouseButton::Left) || touch_x.is_some();

    if !controller.state.dragging && pressed {
        if let Some(x) = pointer_x {
            controller.state.drag_start(x);
            events.write(DragActiveChanged { active: true });
        }
    } else if controller.state.dragging && pressed {
        if let Some(x) = pointer_x {
            controller.state.drag_move(x);
        }
    } else if controller.state.dragging && !pressed {
        controller.state.drag_stop();
        events.write(DragActiveChanged { active: false });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_moves_relative_to_grab_point() {
        let mut state = DragState::default();
        state.drag_start(100.0);
        state.drag_move(130.0);
        assert_eq!(state.position, 30.0);
        state.drag_move(90.0);
        assert_eq!(state.position, -10.0);
    }

    #[test]
    fn position_is_retained_across_drags() {
        let mut state = DragState::default();
        state.drag_start(0.0);
        state.drag_move(50.0);
        state.drag_stop();
        assert_eq!(state.position, 50.0);

        // A new grab far from the old release point must not jump.
        state.drag_start(200.0);
        assert_eq!(state.position, 50.0);
        state.drag_move(210.0);
        assert_eq!(state.position, 60.0);
    }

    #[test]
    fn moves_while_not_dragging_are_ignored() {
        let mut state = DragState::default();
        state.drag_move(500.0);
        assert_eq!(state.position, 0.0);
    }
}
