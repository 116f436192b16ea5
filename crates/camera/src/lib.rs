//! First-person camera for the cube viewer.
//!
//! Orientation is stored as yaw/pitch in degrees and turned into a forward
//! vector once per frame. The view matrix is a cache of the last `update()`.
//!
//! # Invariants
//! - Pitch stays within [`PITCH_LIMIT`] degrees of the horizon.
//! - Field of view stays within [`FOV_MIN`, `FOV_MAX`] degrees.
//! - The view matrix is only ever rebuilt from position/yaw/pitch/up.

mod orientation;
mod state;

pub use orientation::forward_from_angles;
pub use state::{
    CameraState, DEFAULT_MOVE_SPEED, FOV_MAX, FOV_MIN, Movement, PITCH_LIMIT, WORLD_UP,
    clamp_field_of_view, clamp_pitch,
};

pub fn crate_info() -> &'static str {
    "cubeview-camera v0.1.0"
}
