use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use cubeview_common::ViewerConfig;
use cubeview_input::{HeldKeys, Key};
use cubeview_render::{
    FrameOutcome, ManualClock, PrimitiveHandle, RecordingDevice, Scene, Session, SessionSettings,
    SessionSummary,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubeview-cli", about = "Headless tools for the cube viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Viewer configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective configuration
    Info,
    /// Run the frame loop against a recording device
    Simulate(SimulateArgs),
    /// Write the effective configuration as JSON
    WriteConfig {
        /// Destination file
        path: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
struct SimulateArgs {
    /// Number of frames to run
    #[arg(short, long, default_value = "60")]
    frames: u64,
    /// Seconds between frames
    #[arg(short, long, default_value = "0.016666667")]
    timestep: f64,
    /// Keys held for the whole run, e.g. `w,a` or `up`
    #[arg(long, value_delimiter = ',')]
    hold: Vec<Key>,
    /// Cursor travel per frame along x, in pixels
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    look_dx: f64,
    /// Cursor travel per frame along y, in pixels (positive is down)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    look_dy: f64,
    /// Scroll per frame; positive narrows the field of view
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    scroll: f64,
    /// Print every recorded device command
    #[arg(long)]
    transcript: bool,
}

/// Drive a session for `args.frames` frames on a manual clock. Returns the
/// summary and the recorded device commands.
fn simulate(config: &ViewerConfig, args: &SimulateArgs) -> (SessionSummary, RecordingDevice) {
    let scene = Scene::spinning_cubes(PrimitiveHandle(0));
    let mut session = Session::new(SessionSettings::from_config(config), scene);
    let clock = ManualClock::new();
    let keys: HeldKeys = args.hold.iter().copied().collect();
    let mut device = RecordingDevice::new();

    // Start the cursor mid-window; this sample only seeds the tracker.
    let mut cursor = (
        f64::from(config.window.width) / 2.0,
        f64::from(config.window.height) / 2.0,
    );
    session.cursor_moved(cursor.0, cursor.1);

    for frame in 0..args.frames {
        if frame > 0 {
            clock.advance(args.timestep);
        }
        if args.look_dx != 0.0 || args.look_dy != 0.0 {
            cursor.0 += args.look_dx;
            cursor.1 += args.look_dy;
            session.cursor_moved(cursor.0, cursor.1);
        }
        if args.scroll != 0.0 {
            session.scrolled(args.scroll);
        }
        if session.frame(&clock, &keys, &mut device) == FrameOutcome::Close {
            tracing::info!(frame, "escape held, closing");
            break;
        }
    }
    (session.finish(), device)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = ViewerConfig::load_or_default(cli.config.as_deref())
        .context("failed to load viewer config")?;

    match cli.command {
        Commands::Info => {
            println!("cubeview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", cubeview_common::crate_info());
            println!("camera: {}", cubeview_camera::crate_info());
            println!("input: {}", cubeview_input::crate_info());
            println!("render: {}", cubeview_render::crate_info());
            println!(
                "window: \"{}\" {}x{} (aspect {:.3})",
                config.window.title,
                config.window.width,
                config.window.height,
                config.aspect_ratio()
            );
            let p = config.camera.initial_position();
            println!(
                "camera: start=({}, {}, {}) speed={} sensitivity={} rearm_on_focus={}",
                p.x,
                p.y,
                p.z,
                config.camera.move_speed,
                config.camera.mouse_sensitivity,
                config.camera.rearm_on_focus
            );
            let keys: Vec<&str> = Key::ALL.iter().map(|k| k.name()).collect();
            println!("keys: {}", keys.join(", "));
        }
        Commands::Simulate(args) => {
            anyhow::ensure!(
                args.timestep.is_finite() && args.timestep >= 0.0,
                "timestep must be a non-negative number of seconds"
            );
            let (summary, device) = simulate(&config, &args);
            if args.transcript {
                print!("{}", device.transcript());
            }
            println!("{summary}");
        }
        Commands::WriteConfig { path } => {
            config
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(frames: u64) -> SimulateArgs {
        SimulateArgs {
            frames,
            timestep: 0.1,
            hold: Vec::new(),
            look_dx: 0.0,
            look_dy: 0.0,
            scroll: 0.0,
            transcript: false,
        }
    }

    #[test]
    fn cli_parses_simulate_flags() {
        let cli = Cli::try_parse_from([
            "cubeview-cli",
            "simulate",
            "--frames",
            "5",
            "--hold",
            "w,a",
            "--look-dx",
            "-3",
        ])
        .unwrap();
        let Commands::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.frames, 5);
        assert_eq!(args.hold, vec![Key::W, Key::A]);
        assert_eq!(args.look_dx, -3.0);
    }

    #[test]
    fn holding_w_walks_forward() {
        let args = SimulateArgs {
            hold: vec![Key::W],
            ..args(11)
        };
        let (summary, device) = simulate(&ViewerConfig::default(), &args);
        assert_eq!(summary.frames, 11);
        // Ten steps of 0.1 s at 2.5 units/s from z = 3.
        assert!((summary.final_position.z - 0.5).abs() < 1e-4);
        assert_eq!(device.frames_presented(), 11);
    }

    #[test]
    fn look_turns_the_camera() {
        let args = SimulateArgs {
            look_dx: 10.0,
            ..args(3)
        };
        let (summary, _) = simulate(&ViewerConfig::default(), &args);
        assert!((summary.yaw - -87.0).abs() < 1e-4);
    }

    #[test]
    fn escape_stops_early() {
        let args = SimulateArgs {
            hold: vec![Key::Escape],
            ..args(10)
        };
        let (summary, _) = simulate(&ViewerConfig::default(), &args);
        assert_eq!(summary.frames, 1);
    }
}
