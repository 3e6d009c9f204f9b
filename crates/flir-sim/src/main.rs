//! Offline driver for the FLIR camera.
//!
//! Runs a camera session against an in-memory flat world and logs the
//! telemetry a player would see on the HUD.
//!
//! Run with: `cargo run -p flir-sim -- --frames 600 --mode-switches 1`

mod sim;
mod world;

use std::path::PathBuf;

use clap::Parser;
use flir_config::{CONFIG_FILE_NAME, CliArgs, Config, ConfigError, default_config_dir};
use flir_host::{FlirSession, SessionSettings, TaskRegistry};
use glam::Vec3;
use tracing::{info, warn};

use crate::sim::FlightPlan;
use crate::world::{FlatWorld, Obstacle};

/// CLI arguments for the simulator binary.
#[derive(Parser, Debug)]
#[command(name = "flir-sim", about = "Fly the FLIR camera over flat terrain")]
struct SimArgs {
    #[command(flatten)]
    common: CliArgs,

    /// Frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Frame length in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Vehicle altitude in meters.
    #[arg(long, default_value_t = 300.0)]
    altitude: f32,

    /// Vehicle ground speed in meters per second, heading north.
    #[arg(long, default_value_t = 40.0)]
    speed: f32,

    /// Frames of downward look input before level flight.
    #[arg(long, default_value_t = 8)]
    tilt_frames: u32,

    /// Scroll-up presses at the start of the flight.
    #[arg(long, default_value_t = 0)]
    zoom_steps: u32,

    /// `switchmode` commands after the camera comes on.
    #[arg(long, default_value_t = 0)]
    mode_switches: u32,

    /// Put an obstacle one kilometer ahead of the vehicle.
    #[arg(long)]
    obstacle: bool,
}

/// Config as loaded before logging is up. Load problems are carried here
/// and reported once the subscriber is installed.
struct LoadedConfig {
    config: Config,
    dir: Option<PathBuf>,
    error: Option<ConfigError>,
}

/// Read the saved config, apply CLI overrides and validate the result.
/// Any failure falls back to defaults.
fn load_config(common: &CliArgs) -> LoadedConfig {
    let dir = common.config.clone().or_else(default_config_dir);
    let (mut config, mut error) = match dir.as_deref().map(Config::load_or_create) {
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (Config::default(), Some(err)),
        None => (Config::default(), None),
    };
    config.apply_cli_overrides(common);
    if let Err(err) = config.validate() {
        config = Config::default();
        error = Some(err);
    }
    LoadedConfig { config, dir, error }
}

fn main() {
    let args = SimArgs::parse();
    let LoadedConfig { config, dir, error } = load_config(&args.common);

    flir_log::init_logging(None, cfg!(debug_assertions), Some(&config));
    match (error, dir) {
        (Some(err), _) => warn!(%err, "failed to load config, using defaults"),
        (None, Some(dir)) => info!("Config: {}", dir.join(CONFIG_FILE_NAME).display()),
        (None, None) => info!("No config directory, using defaults"),
    }

    let mut world = FlatWorld::new(
        Vec3::new(0.0, 0.0, args.altitude),
        Vec3::new(0.0, args.speed, 0.0),
    );
    if args.obstacle {
        world = world.with_obstacle(Obstacle {
            center: Vec3::new(0.0, 1000.0, 0.0),
            radius: 60.0,
        });
    }
    info!(
        "Vehicle: alt={:.0}m, speed={:.0}m/s | anchor {:.4}, {:.4}",
        args.altitude, args.speed, config.geo.anchor_latitude, config.geo.anchor_longitude,
    );

    let mut session = FlirSession::new(TaskRegistry::new(), SessionSettings::from_config(&config));
    let plan = FlightPlan {
        frames: args.frames,
        frame_ms: args.frame_ms,
        tilt_frames: args.tilt_frames,
        zoom_steps: args.zoom_steps,
        mode_switches: args.mode_switches,
    };
    let report = sim::fly(&mut session, &mut world, &plan);

    info!(
        "Flight done: {} samples, {} markers, mode {}, fov {:?}",
        report.samples, report.markers, report.mode, report.final_fov,
    );
    if let Some(last) = report.last {
        info!("Last telemetry: {}", last.summary());
    }
    info!(
        "Vehicle ended at ({:.0}, {:.0}, {:.0}); {} HUD messages, filters {:?}",
        world.vehicle().position.x,
        world.vehicle().position.y,
        world.vehicle().position.z,
        report.hud_messages,
        report.filters,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(dir: &std::path::Path) -> CliArgs {
        CliArgs {
            config: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_config_creates_file_and_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            poll_interval_ms: Some(500),
            ..args_for(dir.path())
        };
        let loaded = load_config(&args);
        assert!(loaded.error.is_none());
        assert_eq!(loaded.dir.as_deref(), Some(dir.path()));
        assert_eq!(loaded.config.tracking.poll_interval_ms, 500);
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_load_config_reports_rejected_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "(zoom: (time_scaled: true, reference_hz: 0.0))",
        )
        .unwrap();
        let loaded = load_config(&args_for(dir.path()));
        assert!(matches!(
            loaded.error,
            Some(ConfigError::Invalid {
                field: "zoom.reference_hz",
                ..
            })
        ));
        assert_eq!(loaded.config, Config::default());
    }

    #[test]
    fn test_load_config_rejects_bad_override() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            anchor_lat: Some(f64::NAN),
            ..args_for(dir.path())
        };
        let loaded = load_config(&args);
        assert!(matches!(loaded.error, Some(ConfigError::Invalid { .. })));
        assert_eq!(loaded.config, Config::default());
    }
}
