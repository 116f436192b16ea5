use crate::mesh::{Vertex, cube_mesh};
use crate::overlay::{OverlayFrame, OverlayRenderer};
use crate::shaders;
use crate::texture::{TextureError, TextureImage, checkerboard, stripes};
use bytemuck::{Pod, Zeroable};
use cubeview_common::ViewerConfig;
use cubeview_render::{
    PrimitiveHandle, RenderDevice, UNIFORM_MODEL, UNIFORM_PROJECTION, UNIFORM_VIEW,
};
use glam::Mat4;
use std::ops::Range;
use std::path::PathBuf;
use wgpu::util::DeviceExt;

/// Draws accepted per frame; further draws are dropped with a warning.
pub const MAX_INSTANCES: usize = 1024;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Failures while bringing up the GPU device.
#[derive(Debug, thiserror::Error)]
pub enum GpuInitError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface supports no texture formats on this adapter")]
    NoSurfaceFormat,
    #[error(transparent)]
    Texture(#[from] TextureError),
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model: [[f32; 4]; 4],
}

#[derive(Debug, Clone, PartialEq)]
struct Batch {
    primitive: PrimitiveHandle,
    instances: Range<u32>,
}

/// Draws collected between `begin_frame` and `present`. Consecutive draws of
/// the same primitive share one instanced draw call.
#[derive(Debug, Default)]
struct DrawList {
    instances: Vec<InstanceData>,
    batches: Vec<Batch>,
    dropped: usize,
}

impl DrawList {
    fn clear(&mut self) {
        self.instances.clear();
        self.batches.clear();
        self.dropped = 0;
    }

    fn push(&mut self, primitive: PrimitiveHandle, model: Mat4) {
        if self.instances.len() >= MAX_INSTANCES {
            self.dropped += 1;
            return;
        }
        let index = self.instances.len() as u32;
        self.instances.push(InstanceData {
            model: model.to_cols_array_2d(),
        });
        match self.batches.last_mut() {
            Some(batch) if batch.primitive == primitive && batch.instances.end == index => {
                batch.instances.end += 1;
            }
            _ => self.batches.push(Batch {
                primitive,
                instances: index..index + 1,
            }),
        }
    }
}

struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// [`RenderDevice`] that draws into a window surface.
pub struct WgpuDevice {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    meshes: Vec<Mesh>,
    instance_buffer: wgpu::Buffer,
    depth_view: wgpu::TextureView,
    overlay: OverlayRenderer,
    pending_overlay: Option<OverlayFrame>,
    // Per-frame state, reset by `begin_frame`.
    clear_color: wgpu::Color,
    globals: Globals,
    model: Mat4,
    draws: DrawList,
}

impl WgpuDevice {
    /// Create the surface, device, pipeline and textures.
    ///
    /// `target` is usually an `Arc<winit::window::Window>`; `width`/`height`
    /// are its current inner size in physical pixels.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        viewer: &ViewerConfig,
    ) -> Result<Self, GpuInitError> {
        let [base_image, overlay_image] = load_textures(&viewer.render.textures)?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(target)?;

        let adapter = request_adapter(&instance, &surface)?;
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubeview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(GpuInitError::NoSurfaceFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let globals = Globals {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let base_view = upload_texture(&device, &queue, &base_image, "base_texture");
        let overlay_view = upload_texture(&device, &queue, &overlay_image, "overlay_texture");
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&base_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&overlay_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &texture_layout],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CUBE_SHADER.into()),
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                            2 => Float32x2,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (cube_vertices, cube_indices) = cube_mesh();
        let cube = Mesh {
            vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cube_vertex_buffer"),
                contents: bytemuck::cast_slice(&cube_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cube_index_buffer"),
                contents: bytemuck::cast_slice(&cube_indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: cube_indices.len() as u32,
        };

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (MAX_INSTANCES * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_view = create_depth_view(&device, config.width, config.height);
        let overlay = OverlayRenderer::new(&device, format);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            adapter = %adapter.get_info().name,
            ?format,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            globals_bind_group,
            texture_bind_group,
            meshes: vec![cube],
            instance_buffer,
            depth_view,
            overlay,
            pending_overlay: None,
            clear_color: wgpu::Color::BLACK,
            globals,
            model: Mat4::IDENTITY,
            draws: DrawList::default(),
        })
    }

    /// Handle for the unit cube primitive.
    pub fn cube_handle(&self) -> PrimitiveHandle {
        PrimitiveHandle(0)
    }

    /// Reconfigure the surface and depth buffer for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, self.config.width, self.config.height);
        tracing::debug!(
            width = self.config.width,
            height = self.config.height,
            "surface resized"
        );
    }

    /// Paint `frame` over the scene at the next `present`. Replaces any
    /// overlay still waiting.
    pub fn queue_overlay(&mut self, frame: OverlayFrame) {
        self.overlay
            .upload_textures(&self.device, &self.queue, &frame);
        if let Some(stale) = self.pending_overlay.replace(frame) {
            self.overlay.free_textures(&stale);
        }
    }

    fn finish_overlay(&mut self) {
        if let Some(frame) = self.pending_overlay.take() {
            self.overlay.free_textures(&frame);
        }
    }

    fn acquire(&mut self) -> Option<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Some(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                None
            }
        }
    }
}

impl RenderDevice for WgpuDevice {
    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        let [r, g, b, a] = clear_color.map(f64::from);
        self.clear_color = wgpu::Color { r, g, b, a };
        self.model = Mat4::IDENTITY;
        self.draws.clear();
    }

    fn set_uniform_mat4(&mut self, name: &str, value: Mat4) {
        match name {
            UNIFORM_VIEW => self.globals.view = value.to_cols_array_2d(),
            UNIFORM_PROJECTION => self.globals.projection = value.to_cols_array_2d(),
            UNIFORM_MODEL => self.model = value,
            other => tracing::warn!(uniform = other, "ignoring unknown uniform"),
        }
    }

    fn draw(&mut self, primitive: PrimitiveHandle) {
        if primitive.0 as usize >= self.meshes.len() {
            tracing::warn!(primitive = primitive.0, "draw of unknown primitive ignored");
            return;
        }
        self.draws.push(primitive, self.model);
    }

    fn present(&mut self) {
        if self.draws.dropped > 0 {
            tracing::warn!(
                dropped = self.draws.dropped,
                max = MAX_INSTANCES,
                "instance buffer full"
            );
        }

        let Some(output) = self.acquire() else {
            self.finish_overlay();
            return;
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&self.globals));
        if !self.draws.instances.is_empty() {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.draws.instances),
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_bind_group(1, &self.texture_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for batch in &self.draws.batches {
                let mesh = &self.meshes[batch.primitive.0 as usize];
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
            }
        }

        let mut commands = Vec::new();
        if let Some(frame) = &self.pending_overlay {
            commands = self.overlay.paint(
                &self.device,
                &self.queue,
                &mut encoder,
                &view,
                [self.config.width, self.config.height],
                frame,
            );
        }
        commands.push(encoder.finish());
        self.queue.submit(commands);
        output.present();
        self.finish_overlay();
    }
}

fn request_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
) -> Result<wgpu::Adapter, GpuInitError> {
    pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: Some(surface),
        force_fallback_adapter: false,
    }))
    .ok_or(GpuInitError::NoAdapter)
}

/// Configured images, with the built-in patterns standing in for any that
/// are not configured.
fn load_textures(paths: &[PathBuf]) -> Result<[TextureImage; 2], TextureError> {
    let base = match paths.first() {
        Some(path) => TextureImage::load(path)?,
        None => checkerboard(256, 8, [181, 134, 84, 255], [120, 82, 45, 255]),
    };
    let overlay = match paths.get(1) {
        Some(path) => TextureImage::load(path)?,
        None => stripes(256, 16, [255, 220, 60, 255], [40, 40, 40, 255]),
    };
    Ok([base, overlay])
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &TextureImage,
    label: &str,
) -> wgpu::TextureView {
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &image.rgba,
    );
    texture.create_view(&Default::default())
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
