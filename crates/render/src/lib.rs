//! Rendering adapter: the per-frame loop that turns camera state into uniform
//! writes and draw calls on an abstract device.
//!
//! # Invariants
//! - The camera is updated exactly once per frame, before any uniform write.
//! - `view` and `projection` are written once per frame; every draw is
//!   preceded by its own `model` write.
//! - Nothing here names a graphics API. The wgpu backend and the headless
//!   [`RecordingDevice`] both sit behind [`RenderDevice`].

mod clock;
mod device;
mod projection;
mod recording;
mod scene;
mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use device::{PrimitiveHandle, RenderDevice, UNIFORM_MODEL, UNIFORM_PROJECTION, UNIFORM_VIEW};
pub use projection::{FAR_PLANE, NEAR_PLANE, perspective};
pub use recording::{DeviceCommand, RecordingDevice};
pub use scene::{CUBE_POSITIONS, SPIN_DEGREES_PER_SECOND, Scene, SceneObject};
pub use session::{FrameOutcome, MAX_FRAME_DELTA, Session, SessionSettings, SessionSummary};

pub fn crate_info() -> &'static str {
    "cubeview-render v0.1.0"
}
