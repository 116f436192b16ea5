use glam::Mat4;

/// World-to-eye transform, written once per frame.
pub const UNIFORM_VIEW: &str = "view";
/// Eye-to-clip transform, written once per frame.
pub const UNIFORM_PROJECTION: &str = "projection";
/// Object-to-world transform, written before every draw.
pub const UNIFORM_MODEL: &str = "model";

/// Opaque reference to geometry the device already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveHandle(pub u32);

/// The graphics device as seen by the frame loop.
///
/// Uniform writes behave like GL program state: a value stays bound until it
/// is written again, and each `draw` uses whatever `model` was written last.
/// Nothing here can fail; a backend that loses its surface mid-frame recovers
/// on its own and drops the frame.
pub trait RenderDevice {
    /// Start a frame, clearing colour and depth.
    fn begin_frame(&mut self, clear_color: [f32; 4]);

    /// Write a named 4x4 matrix uniform.
    fn set_uniform_mat4(&mut self, name: &str, value: Mat4);

    /// Draw `primitive` with the currently bound uniforms.
    fn draw(&mut self, primitive: PrimitiveHandle);

    /// Finish the frame and show it.
    fn present(&mut self);
}
