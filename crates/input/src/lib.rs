//! Input handling: raw key state, cursor samples and scroll deltas mapped onto
//! camera mutations.
//!
//! # Invariants
//! - The first cursor sample after construction or [`InputAdapter::rearm`]
//!   never rotates the camera.
//! - Pitch and field of view are clamped before they are committed.
//! - The adapter never reads the camera's derived matrices.
//!
//! Nothing here depends on a windowing library; the desktop app translates
//! its native key codes into [`Key`].

pub mod action;
pub mod adapter;
pub mod keys;

pub use action::{Action, poll_actions};
pub use adapter::{CursorTracking, DEFAULT_SENSITIVITY, InputAdapter};
pub use keys::{HeldKeys, Key, KeyState, UnknownKey};

pub fn crate_info() -> &'static str {
    "cubeview-input v0.1.0"
}
