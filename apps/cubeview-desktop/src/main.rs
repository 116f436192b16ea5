use anyhow::{Context, Result};
use clap::Parser;
use cubeview_common::ViewerConfig;
use cubeview_input::{HeldKeys, Key};
use cubeview_render::{FrameOutcome, Scene, Session, SessionSettings, SystemClock};
use cubeview_render_wgpu::{OverlayFrame, WgpuDevice};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Pixel-precise wheels (touchpads) report pixels; this many make one notch.
const PIXELS_PER_SCROLL_LINE: f64 = 20.0;

#[derive(Parser)]
#[command(name = "cubeview-desktop", about = "Fly through a field of spinning cubes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewer configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        _ => None,
    }
}

fn scroll_lines(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_SCROLL_LINE,
    }
}

/// Cursor position integrated from raw mouse motion. A grabbed pointer stops
/// producing window positions at the edge; raw deltas keep coming.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct VirtualCursor {
    x: f64,
    y: f64,
}

impl VirtualCursor {
    fn moved_by(&mut self, (dx, dy): (f64, f64)) -> (f64, f64) {
        self.x += dx;
        self.y += dy;
        (self.x, self.y)
    }
}

fn capture_cursor(window: &Window, captured: bool) {
    if captured {
        let grab = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grab {
            tracing::warn!("cursor grab unavailable: {e}");
        }
    } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        tracing::debug!("cursor release failed: {e}");
    }
    window.set_cursor_visible(!captured);
}

fn hud_lines(session: &Session) -> Vec<String> {
    let camera = session.camera();
    let p = camera.position();
    vec![
        format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
        format!("Yaw: {:.1}  Pitch: {:.1}", camera.yaw(), camera.pitch()),
        format!("FOV: {:.1}", camera.field_of_view()),
        format!("Counter: {}", session.counter()),
        format!(
            "Frame: {:.2} ms  ({} frames)",
            session.last_frame_delta() * 1000.0,
            session.frames()
        ),
    ]
}

fn draw_hud(ctx: &egui::Context, session: &Session) {
    egui::Window::new("cubeview")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            for line in hud_lines(session) {
                ui.label(line);
            }
            ui.separator();
            ui.small(
                "WASD: Move | Mouse: Look | Wheel: Zoom | Up/Down: Counter | F1: HUD | Esc: Quit",
            );
        });
}

/// Everything that exists once the window is up.
struct Viewer {
    window: Arc<Window>,
    device: WgpuDevice,
    session: Session,
    egui_winit: egui_winit::State,
}

struct App {
    config: ViewerConfig,
    viewer: Option<Viewer>,
    keys: HeldKeys,
    clock: SystemClock,
    cursor: VirtualCursor,
    focused: bool,
    egui_ctx: egui::Context,
    show_hud: bool,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            viewer: None,
            keys: HeldKeys::new(),
            clock: SystemClock::new(),
            cursor: VirtualCursor::default(),
            focused: false,
            egui_ctx: egui::Context::default(),
            show_hud: false,
            error: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<Viewer> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let device = WgpuDevice::new(window.clone(), size.width, size.height, &self.config)
            .context("failed to initialize GPU")?;

        let scene = Scene::spinning_cubes(device.cube_handle());
        let session = Session::new(SessionSettings::from_config(&self.config), scene);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        capture_cursor(&window, window.has_focus());

        Ok(Viewer {
            window,
            device,
            session,
            egui_winit,
        })
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        if code == KeyCode::F1 && pressed && !repeat {
            self.show_hud = !self.show_hud;
            tracing::debug!(visible = self.show_hud, "HUD toggled");
            return;
        }
        if let Some(key) = map_key(code) {
            self.keys.set(key, pressed);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        if self.show_hud {
            let raw_input = viewer.egui_winit.take_egui_input(&viewer.window);
            let session = &viewer.session;
            let output = self.egui_ctx.run(raw_input, |ctx| draw_hud(ctx, session));
            viewer
                .egui_winit
                .handle_platform_output(&viewer.window, output.platform_output);
            let paint_jobs = self
                .egui_ctx
                .tessellate(output.shapes, output.pixels_per_point);
            viewer.device.queue_overlay(OverlayFrame {
                paint_jobs,
                textures_delta: output.textures_delta,
                pixels_per_point: output.pixels_per_point,
            });
        }

        let outcome = viewer
            .session
            .frame(&self.clock, &self.keys, &mut viewer.device);
        if outcome == FrameOutcome::Close {
            tracing::info!("escape pressed, closing");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(viewer) => {
                self.focused = viewer.window.has_focus();
                self.viewer = Some(viewer);
            }
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if self.show_hud {
            let response = viewer.egui_winit.on_window_event(&viewer.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                viewer.device.resize(size.width, size.height);
            }
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                viewer.session.focus_changed(focused);
                capture_cursor(&viewer.window, focused);
                if !focused {
                    self.keys.clear();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                viewer.session.scrolled(scroll_lines(delta));
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                self.handle_key(code, state == ElementState::Pressed, repeat);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let DeviceEvent::MouseMotion { delta } = event else {
            return;
        };
        if !self.focused {
            return;
        }
        if let Some(viewer) = self.viewer.as_mut() {
            let (x, y) = self.cursor.moved_by(delta);
            viewer.session.cursor_moved(x, y);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &self.viewer {
            viewer.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = self.viewer.take() {
            viewer.session.finish();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = ViewerConfig::load_or_default(cli.config.as_deref())
        .context("failed to load viewer config")?;

    tracing::info!("cubeview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
