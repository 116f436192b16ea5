use cubeview_camera::{CameraState, clamp_field_of_view, clamp_pitch};
use glam::Vec2;

use crate::action::Action;

/// Degrees of rotation per pixel of cursor travel.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;

/// Cursor tracker state.
///
/// `Armed` swallows the next sample to seed the last position, so capturing
/// the cursor does not spin the camera by however far it jumped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorTracking {
    Armed,
    Tracking { last_x: f32, last_y: f32 },
}

/// Maps raw input channels onto camera mutations.
#[derive(Debug, Clone)]
pub struct InputAdapter {
    tracking: CursorTracking,
    sensitivity: f32,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::with_sensitivity(DEFAULT_SENSITIVITY)
    }

    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            tracking: CursorTracking::Armed,
            sensitivity,
        }
    }

    pub fn tracking(&self) -> CursorTracking {
        self.tracking
    }

    /// Swallow the next cursor sample again (cursor capture re-acquired).
    pub fn rearm(&mut self) {
        if self.tracking != CursorTracking::Armed {
            tracing::debug!("cursor tracking re-armed");
        }
        self.tracking = CursorTracking::Armed;
    }

    /// Apply every movement action for `elapsed_seconds`.
    ///
    /// Held keys add up independently; forward plus strafe is faster than
    /// either alone.
    pub fn apply_actions(
        &self,
        actions: &[Action],
        camera: &mut CameraState,
        elapsed_seconds: f32,
    ) {
        for action in actions {
            if let Action::Move(direction) = action {
                camera.apply_movement(*direction, elapsed_seconds);
            }
        }
    }

    /// Feed an absolute cursor position. Returns the yaw/pitch change in
    /// degrees that was committed, or `None` for a seeding sample.
    pub fn cursor_moved(&mut self, x: f64, y: f64, camera: &mut CameraState) -> Option<Vec2> {
        let (x, y) = (x as f32, y as f32);
        let (last_x, last_y) = match self.tracking {
            CursorTracking::Armed => {
                self.tracking = CursorTracking::Tracking {
                    last_x: x,
                    last_y: y,
                };
                return None;
            }
            CursorTracking::Tracking { last_x, last_y } => (last_x, last_y),
        };
        self.tracking = CursorTracking::Tracking {
            last_x: x,
            last_y: y,
        };

        // Screen Y grows downwards; moving the cursor up should look up.
        let offset = Vec2::new(x - last_x, last_y - y) * self.sensitivity;
        let yaw = camera.yaw() + offset.x;
        let pitch = clamp_pitch(camera.pitch() + offset.y);
        camera.set_orientation(yaw, pitch);
        Some(offset)
    }

    /// Feed a vertical wheel delta; scrolling up narrows the field of view.
    pub fn scrolled(&self, delta_y: f64, camera: &mut CameraState) {
        let fov = clamp_field_of_view(camera.field_of_view() - delta_y as f32);
        camera.set_field_of_view(fov);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_camera::Movement;
    use glam::Vec3;

    fn camera() -> CameraState {
        CameraState::new(Vec3::new(0.0, 0.0, 3.0))
    }

    #[test]
    fn first_sample_is_swallowed() {
        let mut adapter = InputAdapter::new();
        let mut cam = camera();
        assert_eq!(adapter.cursor_moved(5000.0, -300.0, &mut cam), None);
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(
            adapter.tracking(),
            CursorTracking::Tracking {
                last_x: 5000.0,
                last_y: -300.0
            }
        );
    }

    #[test]
    fn second_sample_rotates_by_scaled_offset() {
        let mut adapter = InputAdapter::new();
        let mut cam = camera();
        adapter.cursor_moved(400.0, 300.0, &mut cam);
        let delta = adapter.cursor_moved(420.0, 290.0, &mut cam).unwrap();

        assert!((delta.x - 2.0).abs() < 1e-5);
        assert!((delta.y - 1.0).abs() < 1e-5);
        assert!((cam.yaw() - -88.0).abs() < 1e-4);
        assert!((cam.pitch() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn samples_accumulate_from_last_position() {
        let mut adapter = InputAdapter::with_sensitivity(1.0);
        let mut cam = camera();
        adapter.cursor_moved(0.0, 0.0, &mut cam);
        adapter.cursor_moved(10.0, 0.0, &mut cam);
        adapter.cursor_moved(15.0, 0.0, &mut cam);
        assert!((cam.yaw() - -75.0).abs() < 1e-4);
    }

    #[test]
    fn pitch_clamps_at_limit() {
        let mut adapter = InputAdapter::with_sensitivity(1.0);
        let mut cam = camera();
        adapter.cursor_moved(0.0, 1000.0, &mut cam);
        adapter.cursor_moved(0.0, 0.0, &mut cam);
        assert_eq!(cam.pitch(), 89.0);
        adapter.cursor_moved(0.0, 5000.0, &mut cam);
        assert_eq!(cam.pitch(), -89.0);
    }

    #[test]
    fn clamped_pitch_recovers_immediately() {
        let mut adapter = InputAdapter::with_sensitivity(1.0);
        let mut cam = camera();
        adapter.cursor_moved(0.0, 500.0, &mut cam);
        adapter.cursor_moved(0.0, 0.0, &mut cam);
        adapter.cursor_moved(0.0, 10.0, &mut cam);
        assert_eq!(cam.pitch(), 79.0);
    }

    #[test]
    fn rearm_swallows_next_sample() {
        let mut adapter = InputAdapter::new();
        let mut cam = camera();
        adapter.cursor_moved(100.0, 100.0, &mut cam);
        adapter.cursor_moved(110.0, 100.0, &mut cam);
        let yaw = cam.yaw();

        adapter.rearm();
        assert_eq!(adapter.tracking(), CursorTracking::Armed);
        assert_eq!(adapter.cursor_moved(900.0, 900.0, &mut cam), None);
        assert_eq!(cam.yaw(), yaw);
        assert!(adapter.cursor_moved(901.0, 900.0, &mut cam).is_some());
    }

    #[test]
    fn scroll_clamps_field_of_view() {
        let adapter = InputAdapter::new();
        let mut cam = camera();

        adapter.scrolled(10.0, &mut cam);
        assert_eq!(cam.field_of_view(), 35.0);

        for _ in 0..100 {
            adapter.scrolled(1.0, &mut cam);
            assert!(cam.field_of_view() >= 1.0);
        }
        assert_eq!(cam.field_of_view(), 1.0);

        for _ in 0..100 {
            adapter.scrolled(-3.0, &mut cam);
            assert!(cam.field_of_view() <= 45.0);
        }
        assert_eq!(cam.field_of_view(), 45.0);
    }

    #[test]
    fn apply_actions_moves_for_each_held_key() {
        let adapter = InputAdapter::new();
        let mut cam = CameraState::new(Vec3::ZERO);
        let actions = [
            Action::Move(Movement::Forward),
            Action::Close,
            Action::AdjustCounter(1),
            Action::Move(Movement::Right),
        ];
        adapter.apply_actions(&actions, &mut cam, 1.0);
        assert!((cam.position() - Vec3::new(2.5, 0.0, -2.5)).length() < 1e-5);
    }

    #[test]
    fn opposing_keys_cancel() {
        let adapter = InputAdapter::new();
        let mut cam = CameraState::new(Vec3::ZERO);
        let actions = [
            Action::Move(Movement::Left),
            Action::Move(Movement::Right),
        ];
        adapter.apply_actions(&actions, &mut cam, 0.7);
        assert!(cam.position().length() < 1e-5);
    }
}
