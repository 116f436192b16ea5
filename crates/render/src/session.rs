use cubeview_camera::CameraState;
use cubeview_common::ViewerConfig;
use cubeview_input::{Action, InputAdapter, KeyState, poll_actions};
use glam::Vec3;
use std::fmt;

use crate::clock::Clock;
use crate::device::{RenderDevice, UNIFORM_MODEL, UNIFORM_PROJECTION, UNIFORM_VIEW};
use crate::projection::perspective;
use crate::scene::Scene;

/// Longest frame step fed to movement, in seconds. A window drag or debugger
/// pause otherwise turns into one huge jump.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Startup parameters for a [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub initial_position: Vec3,
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub rearm_on_focus: bool,
    /// Fixed projection aspect ratio.
    pub aspect_ratio: f32,
    pub clear_color: [f32; 4],
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl SessionSettings {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            initial_position: config.camera.initial_position(),
            move_speed: config.camera.move_speed,
            mouse_sensitivity: config.camera.mouse_sensitivity,
            rearm_on_focus: config.camera.rearm_on_focus,
            aspect_ratio: config.aspect_ratio(),
            clear_color: config.render.clear_color,
        }
    }
}

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Close,
}

/// Everything the viewer mutates between frames.
///
/// Owned by the application for its whole run; window callbacks forward
/// cursor and scroll events here, and [`Session::frame`] drives one tick.
pub struct Session {
    settings: SessionSettings,
    camera: CameraState,
    input: InputAdapter,
    scene: Scene,
    last_time: Option<f64>,
    last_delta: f32,
    counter: i32,
    frames: u64,
    close_requested: bool,
}

impl Session {
    pub fn new(settings: SessionSettings, scene: Scene) -> Self {
        let camera = CameraState::with_move_speed(settings.initial_position, settings.move_speed);
        let input = InputAdapter::with_sensitivity(settings.mouse_sensitivity);
        tracing::info!(
            position = ?settings.initial_position,
            objects = scene.len(),
            "session started"
        );
        Self {
            settings,
            camera,
            input,
            scene,
            last_time: None,
            last_delta: 0.0,
            counter: 0,
            frames: 0,
            close_requested: false,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Value of the Up/Down debug counter.
    pub fn counter(&self) -> i32 {
        self.counter
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Elapsed seconds used by the most recent frame.
    pub fn last_frame_delta(&self) -> f32 {
        self.last_delta
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if let Some(delta) = self.input.cursor_moved(x, y, &mut self.camera) {
            tracing::trace!(yaw = delta.x, pitch = delta.y, "look");
        }
    }

    pub fn scrolled(&mut self, delta_y: f64) {
        self.input.scrolled(delta_y, &mut self.camera);
        tracing::trace!(fov = self.camera.field_of_view(), "zoom");
    }

    /// Window focus changed. Regaining focus re-arms first-sample suppression
    /// when the settings ask for it.
    pub fn focus_changed(&mut self, focused: bool) {
        if focused && self.settings.rearm_on_focus {
            self.input.rearm();
        }
    }

    /// Run one frame: integrate held keys, rebuild the camera, write uniforms
    /// and draw every scene object.
    pub fn frame(
        &mut self,
        clock: &impl Clock,
        keys: &impl KeyState,
        device: &mut impl RenderDevice,
    ) -> FrameOutcome {
        let now = clock.now();
        let elapsed = match self.last_time {
            Some(previous) => ((now - previous) as f32).clamp(0.0, MAX_FRAME_DELTA),
            None => 0.0,
        };
        self.last_time = Some(now);
        self.last_delta = elapsed;

        let actions = poll_actions(keys);
        self.input.apply_actions(&actions, &mut self.camera, elapsed);
        for action in &actions {
            match action {
                Action::Close => self.close_requested = true,
                Action::AdjustCounter(step) => {
                    self.counter += step;
                    tracing::info!(counter = self.counter, "arrow counter");
                }
                Action::Move(_) => {}
            }
        }

        self.camera.update();
        let projection = perspective(self.camera.field_of_view(), self.settings.aspect_ratio);

        device.begin_frame(self.settings.clear_color);
        device.set_uniform_mat4(UNIFORM_VIEW, self.camera.view_matrix());
        device.set_uniform_mat4(UNIFORM_PROJECTION, projection);
        let time = now as f32;
        for object in self.scene.objects() {
            device.set_uniform_mat4(UNIFORM_MODEL, object.model_matrix(time));
            device.draw(object.primitive);
        }
        device.present();
        self.frames += 1;

        if self.close_requested {
            FrameOutcome::Close
        } else {
            FrameOutcome::Continue
        }
    }

    /// End the session.
    pub fn finish(self) -> SessionSummary {
        let summary = SessionSummary {
            frames: self.frames,
            final_position: self.camera.position(),
            yaw: self.camera.yaw(),
            pitch: self.camera.pitch(),
            field_of_view: self.camera.field_of_view(),
            counter: self.counter,
        };
        tracing::info!(%summary, "session finished");
        summary
    }
}

/// Final camera state and counters, reported at shutdown.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub frames: u64,
    pub final_position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub field_of_view: f32,
    pub counter: i32,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.final_position;
        write!(
            f,
            "frames={} position=({:.3}, {:.3}, {:.3}) yaw={:.2} pitch={:.2} fov={:.1} counter={}",
            self.frames, p.x, p.y, p.z, self.yaw, self.pitch, self.field_of_view, self.counter
        )
    }
}
