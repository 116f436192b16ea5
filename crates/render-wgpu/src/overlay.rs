/// One tessellated egui frame waiting to be painted over the scene.
pub struct OverlayFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Paints [`OverlayFrame`]s on top of the rendered scene.
pub(crate) struct OverlayRenderer {
    renderer: egui_wgpu::Renderer,
}

impl OverlayRenderer {
    pub(crate) fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        Self {
            renderer: egui_wgpu::Renderer::new(device, format, None, 1, false),
        }
    }

    /// Upload new or changed egui textures. Done as soon as a frame is queued
    /// so a skipped presentation cannot lose the font atlas.
    pub(crate) fn upload_textures(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        frame: &OverlayFrame,
    ) {
        for (id, delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
    }

    /// Record a load-op pass painting `frame` onto `target`. Returns command
    /// buffers that must be submitted ahead of `encoder`.
    pub(crate) fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        frame: &OverlayFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };
        let extra = self
            .renderer
            .update_buffers(device, queue, encoder, &frame.paint_jobs, &screen);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &frame.paint_jobs, &screen);
        }
        extra
    }

    /// Release textures egui no longer needs.
    pub(crate) fn free_textures(&mut self, frame: &OverlayFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
