use glam::Mat4;
use std::fmt::Write;

use crate::device::{PrimitiveHandle, RenderDevice};

/// One call received by a [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    BeginFrame { clear_color: [f32; 4] },
    SetUniform { name: String, value: Mat4 },
    Draw(PrimitiveHandle),
    Present,
}

/// Headless device that records every call in order.
///
/// Lets the frame loop run without a window or GPU: tests assert on the
/// command stream, and the CLI prints it as a transcript.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    commands: Vec<DeviceCommand>,
    frames_presented: u64,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Most recent value written to the uniform `name`.
    pub fn last_uniform(&self, name: &str) -> Option<Mat4> {
        self.commands.iter().rev().find_map(|c| match c {
            DeviceCommand::SetUniform { name: n, value } if n == name => Some(*value),
            _ => None,
        })
    }

    /// Commands issued since the most recent `BeginFrame`.
    pub fn last_frame(&self) -> &[DeviceCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DeviceCommand::BeginFrame { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Number of draws in the most recent frame.
    pub fn draw_count(&self) -> usize {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DeviceCommand::Draw(_)))
            .count()
    }

    /// Human-readable listing of the recorded commands, one per line.
    /// Matrices are printed by their translation column.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        let mut frame = 0u64;
        for command in &self.commands {
            match command {
                DeviceCommand::BeginFrame { clear_color: c } => {
                    let _ = writeln!(
                        out,
                        "=== frame {frame} clear=({:.2}, {:.2}, {:.2}, {:.2}) ===",
                        c[0], c[1], c[2], c[3]
                    );
                }
                DeviceCommand::SetUniform { name, value } => {
                    let t = value.w_axis;
                    let _ = writeln!(
                        out,
                        "  set {name:<10} w=({:.3}, {:.3}, {:.3}, {:.3})",
                        t.x, t.y, t.z, t.w
                    );
                }
                DeviceCommand::Draw(handle) => {
                    let _ = writeln!(out, "  draw primitive #{}", handle.0);
                }
                DeviceCommand::Present => {
                    let _ = writeln!(out, "  present");
                    frame += 1;
                }
            }
        }
        out
    }
}

impl RenderDevice for RecordingDevice {
    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.commands.push(DeviceCommand::BeginFrame { clear_color });
    }

    fn set_uniform_mat4(&mut self, name: &str, value: Mat4) {
        self.commands.push(DeviceCommand::SetUniform {
            name: name.to_string(),
            value,
        });
    }

    fn draw(&mut self, primitive: PrimitiveHandle) {
        self.commands.push(DeviceCommand::Draw(primitive));
    }

    fn present(&mut self) {
        self.commands.push(DeviceCommand::Present);
        self.frames_presented += 1;
    }
}
