//! wgpu backend for the cube viewer.
//!
//! [`WgpuDevice`] implements [`cubeview_render::RenderDevice`]: uniform writes
//! and draws are collected during a frame and encoded into a single render
//! pass at `present`, followed by the optional egui overlay.
//!
//! # Invariants
//! - The device never touches camera or session state.
//! - Projection aspect is whatever the session supplies; resizing only
//!   rebuilds the surface and depth buffer.

mod gpu;
mod mesh;
mod overlay;
mod shaders;
mod texture;

pub use gpu::{GpuInitError, MAX_INSTANCES, WgpuDevice};
pub use mesh::{Vertex, cube_mesh};
pub use overlay::OverlayFrame;
pub use texture::{TextureError, TextureImage, checkerboard, stripes};
