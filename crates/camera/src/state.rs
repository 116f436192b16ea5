use glam::{Mat4, Vec3};

use crate::orientation::forward_from_angles;

/// Pitch is kept this many degrees short of straight up/down so the look-at
/// basis never degenerates.
pub const PITCH_LIMIT: f32 = 89.0;
pub const FOV_MIN: f32 = 1.0;
pub const FOV_MAX: f32 = 45.0;
/// World units per second.
pub const DEFAULT_MOVE_SPEED: f32 = 2.5;
pub const WORLD_UP: Vec3 = Vec3::Y;

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;

pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

pub fn clamp_field_of_view(fov: f32) -> f32 {
    fov.clamp(FOV_MIN, FOV_MAX)
}

/// Keyboard movement relative to the current look direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// The viewer's eye.
///
/// `forward` and `view` are caches rebuilt by [`CameraState::update`]; input
/// only touches position and angles. Movement between updates therefore uses
/// the direction from the previous frame.
#[derive(Debug, Clone)]
pub struct CameraState {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    up: Vec3,
    move_speed: f32,
    forward: Vec3,
    view: Mat4,
}

impl CameraState {
    /// Camera at `position` looking down -Z with a 45 degree field of view.
    pub fn new(position: Vec3) -> Self {
        Self::with_move_speed(position, DEFAULT_MOVE_SPEED)
    }

    pub fn with_move_speed(position: Vec3, move_speed: f32) -> Self {
        let mut camera = Self {
            position,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            fov: FOV_MAX,
            up: WORLD_UP,
            move_speed,
            forward: Vec3::NEG_Z,
            view: Mat4::IDENTITY,
        };
        camera.update();
        camera
    }

    /// Recompute the forward vector and view matrix from the stored state.
    pub fn update(&mut self) {
        self.forward = forward_from_angles(self.yaw, self.pitch);
        self.view = Mat4::look_at_rh(self.position, self.position + self.forward, self.up);
    }

    /// Overwrite yaw and pitch (degrees). Pitch is clamped to the pole limit.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        let clamped = clamp_pitch(pitch);
        if clamped != pitch {
            tracing::trace!(pitch, clamped, "pitch clamped");
        }
        self.yaw = yaw;
        self.pitch = clamped;
    }

    /// Overwrite the vertical field of view (degrees), clamped to its range.
    pub fn set_field_of_view(&mut self, fov: f32) {
        self.fov = clamp_field_of_view(fov);
    }

    /// Move for `elapsed_seconds` at the configured speed.
    ///
    /// Strafing uses `forward x up`, so it stays in the ground plane no
    /// matter how far the camera is pitched.
    pub fn apply_movement(&mut self, direction: Movement, elapsed_seconds: f32) {
        let speed = self.move_speed * elapsed_seconds;
        match direction {
            Movement::Forward => self.position += speed * self.forward,
            Movement::Backward => self.position -= speed * self.forward,
            Movement::Left => self.position -= speed * self.right(),
            Movement::Right => self.position += speed * self.right(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn field_of_view(&self) -> f32 {
        self.fov
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit strafe direction for the cached forward vector.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_camera() {
        let cam = CameraState::new(Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.field_of_view(), 45.0);
        assert_eq!(cam.up(), Vec3::Y);
        assert!(approx(cam.forward(), Vec3::NEG_Z));

        let expected = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::Y,
        );
        assert!(cam.view_matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn pitch_is_clamped_on_set() {
        let mut cam = CameraState::new(Vec3::ZERO);
        for input in [-1000.0, -89.5, -89.0, -10.0, 0.0, 42.0, 89.0, 89.01, 1e6] {
            cam.set_orientation(12.0, input);
            assert_eq!(cam.pitch(), input.clamp(-89.0, 89.0));
            assert_eq!(cam.yaw(), 12.0);
        }
    }

    #[test]
    fn yaw_is_not_clamped() {
        let mut cam = CameraState::new(Vec3::ZERO);
        cam.set_orientation(725.0, 0.0);
        assert_eq!(cam.yaw(), 725.0);
    }

    #[test]
    fn fov_is_clamped_on_set() {
        let mut cam = CameraState::new(Vec3::ZERO);
        for input in [-5.0, 0.0, 1.0, 30.0, 45.0, 46.0, 90.0] {
            cam.set_field_of_view(input);
            assert_eq!(cam.field_of_view(), input.clamp(1.0, 45.0));
        }
    }

    #[test]
    fn update_is_idempotent() {
        let mut cam = CameraState::new(Vec3::new(1.0, 2.0, 3.0));
        cam.set_orientation(33.0, -12.0);
        cam.update();
        let first = cam.view_matrix();
        cam.update();
        assert_eq!(cam.view_matrix(), first);
    }

    #[test]
    fn forward_movement_one_second() {
        let mut cam = CameraState::new(Vec3::ZERO);
        cam.apply_movement(Movement::Forward, 1.0);
        assert!(approx(cam.position(), Vec3::new(0.0, 0.0, -2.5)));
    }

    #[test]
    fn backward_undoes_forward() {
        let mut cam = CameraState::new(Vec3::new(4.0, 1.0, -2.0));
        cam.set_orientation(17.0, 35.0);
        cam.update();
        cam.apply_movement(Movement::Forward, 0.3);
        cam.apply_movement(Movement::Backward, 0.3);
        assert!(approx(cam.position(), Vec3::new(4.0, 1.0, -2.0)));
    }

    #[test]
    fn strafe_right_at_default_orientation_is_positive_x() {
        let mut cam = CameraState::new(Vec3::ZERO);
        cam.apply_movement(Movement::Right, 2.0);
        assert!(approx(cam.position(), Vec3::new(5.0, 0.0, 0.0)));
        cam.apply_movement(Movement::Left, 2.0);
        assert!(approx(cam.position(), Vec3::ZERO));
    }

    #[test]
    fn strafe_stays_horizontal_for_any_orientation() {
        let mut cam = CameraState::new(Vec3::ZERO);
        let mut yaw = -180.0_f32;
        while yaw <= 180.0 {
            for pitch in [-89.0, -60.0, -1.0, 0.0, 25.0, 89.0] {
                cam.set_orientation(yaw, pitch);
                cam.update();
                let start = cam.position();
                cam.apply_movement(Movement::Left, 0.5);
                let delta = cam.position() - start;
                assert!(delta.dot(cam.up()).abs() < 1e-5, "yaw={yaw} pitch={pitch}");
                assert!((delta.length() - 1.25).abs() < 1e-4);
            }
            yaw += 22.5;
        }
    }

    #[test]
    fn movement_scales_with_elapsed_time() {
        let mut a = CameraState::new(Vec3::ZERO);
        let mut b = CameraState::new(Vec3::ZERO);
        a.apply_movement(Movement::Forward, 0.5);
        b.apply_movement(Movement::Forward, 0.25);
        b.apply_movement(Movement::Forward, 0.25);
        assert!(approx(a.position(), b.position()));
    }

    #[test]
    fn diagonal_movement_is_not_normalized() {
        let mut cam = CameraState::new(Vec3::ZERO);
        cam.apply_movement(Movement::Forward, 1.0);
        cam.apply_movement(Movement::Right, 1.0);
        let expected = 2.5 * 2.0_f32.sqrt();
        assert!((cam.position().length() - expected).abs() < 1e-4);
    }

    #[test]
    fn movement_uses_direction_from_last_update() {
        let mut cam = CameraState::new(Vec3::ZERO);
        cam.set_orientation(0.0, 0.0);
        // Not updated yet: still looking down -Z.
        cam.apply_movement(Movement::Forward, 1.0);
        assert!(approx(cam.position(), Vec3::new(0.0, 0.0, -2.5)));
        cam.update();
        cam.apply_movement(Movement::Forward, 1.0);
        assert!(approx(cam.position(), Vec3::new(2.5, 0.0, -2.5)));
    }

    #[test]
    fn custom_move_speed() {
        let mut cam = CameraState::with_move_speed(Vec3::ZERO, 10.0);
        cam.apply_movement(Movement::Backward, 0.1);
        assert!(approx(cam.position(), Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(cam.move_speed(), 10.0);
    }

    #[test]
    fn view_matrix_maps_target_onto_negative_z_axis() {
        let mut cam = CameraState::new(Vec3::new(1.0, 2.0, 3.0));
        cam.set_orientation(40.0, 20.0);
        cam.update();
        let ahead = cam.position() + cam.forward() * 4.0;
        let eye_space = cam.view_matrix().transform_point3(ahead);
        assert!(approx(eye_space, Vec3::new(0.0, 0.0, -4.0)));
    }
}
