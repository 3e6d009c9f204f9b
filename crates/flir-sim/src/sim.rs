//! Scripted flight: turn the camera on, tilt it toward the ground and fly
//! a straight line while the session samples telemetry.

use flir_camera::CameraMode;
use flir_geo::LatLon;
use flir_host::{
    Command, CommandOutcome, FlirSession, FrameInput, ScrollInput, TargetFix, TaskRegistry,
};
use flir_telemetry::{TelemetrySnapshot, Timestamp};
use glam::Vec2;
use tracing::{info, warn};

use crate::world::FlatWorld;

/// What the scripted flight does.
#[derive(Clone, Copy, Debug)]
pub struct FlightPlan {
    /// Frames to simulate.
    pub frames: u32,
    /// Frame length in milliseconds.
    pub frame_ms: u64,
    /// Frames of full downward look input at the start.
    pub tilt_frames: u32,
    /// Scroll-up presses, one per frame, at the start.
    pub zoom_steps: u32,
    /// `switchmode` commands issued after the camera is enabled.
    pub mode_switches: u32,
}

impl Default for FlightPlan {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_ms: 16,
            tilt_frames: 8,
            zoom_steps: 0,
            mode_switches: 0,
        }
    }
}

/// Summary of a finished flight.
#[derive(Debug, Default)]
pub struct FlightReport {
    /// Telemetry refreshes.
    pub samples: usize,
    /// Last telemetry snapshot.
    pub last: Option<TelemetrySnapshot>,
    /// Result of the closing `target` query.
    pub target: Option<TargetFix>,
    /// Camera mode at the end of the flight.
    pub mode: CameraMode,
    /// Rendered field of view at the end of the flight.
    pub final_fov: Option<f32>,
    /// Ground marker draw calls.
    pub markers: usize,
    /// HUD messages sent, including the closing toggle.
    pub hud_messages: usize,
    /// Night vision and thermal filters while the camera was still on.
    pub filters: (bool, bool),
}

/// Fly `plan` and tear the camera down afterwards.
pub fn fly(
    session: &mut FlirSession<TaskRegistry>,
    world: &mut FlatWorld,
    plan: &FlightPlan,
) -> FlightReport {
    let mut report = FlightReport::default();

    match session.execute(world, Command::ToggleCamera) {
        CommandOutcome::Toggled(true) => {}
        outcome => warn!(?outcome, "camera did not come on"),
    }
    for _ in 0..plan.mode_switches {
        session.execute(world, Command::SwitchMode);
    }
    info!(
        timecycle = world.timecycle().unwrap_or("none"),
        rendering = ?world.rendering(),
        "flight started"
    );

    let dt = plan.frame_ms as f32 / 1000.0;
    for frame in 0..plan.frames {
        if frame > 0 {
            world.step(dt);
        }
        let input = FrameInput {
            scroll: if frame < plan.zoom_steps {
                ScrollInput::Up
            } else {
                ScrollInput::None
            },
            look: if frame < plan.tilt_frames {
                Vec2::Y
            } else {
                Vec2::ZERO
            },
        };
        let now = Timestamp::from_millis(u64::from(frame) * plan.frame_ms);
        if let Some(snapshot) = session.run_frame(world, now, &input) {
            info!(frame, "{}", snapshot.summary());
            report.samples += 1;
            report.last = Some(snapshot);
        }
    }

    if let CommandOutcome::Target(fix) = session.execute(world, Command::Target) {
        match &fix {
            Some(fix) => info!(coords = %LatLon(fix.lat_lon), entity = fix.entity, "target"),
            None => info!("target: no hit"),
        }
        report.target = fix;
    }
    report.mode = session.camera().map_or_else(CameraMode::default, |c| c.mode());
    report.final_fov = world.last_pose().map(|p| p.field_of_view());
    report.filters = world.filters();

    session.detach(world);
    report.markers = world.markers_drawn();
    report.hud_messages = world.hud_messages().len();
    report
}

#[cfg(test)]
mod tests {
    use flir_host::SessionSettings;
    use glam::Vec3;

    use super::*;
    use crate::world::Obstacle;

    fn setup() -> (FlirSession<TaskRegistry>, FlatWorld) {
        let session = FlirSession::new(TaskRegistry::new(), SessionSettings::default());
        let world = FlatWorld::new(Vec3::new(0.0, 0.0, 300.0), Vec3::new(0.0, 40.0, 0.0));
        (session, world)
    }

    #[test]
    fn test_ground_point_tracks_vehicle_speed() {
        let (mut session, mut world) = setup();
        let plan = FlightPlan {
            frames: 120,
            ..Default::default()
        };
        let report = fly(&mut session, &mut world, &plan);

        // Polls at 0, 256, 512, ... ms within 120 * 16 ms.
        assert_eq!(report.samples, 8);
        let last = report.last.unwrap();
        assert!((last.ground_velocity - Vec3::new(0.0, 40.0, 0.0)).length() < 0.1);
        assert!(last.ground_position.is_some());
        assert!(report.markers > 0);
        assert_eq!(report.hud_messages, 2);
        assert!(!session.is_attached());
        assert_eq!(world.rendering(), None);
    }

    #[test]
    fn test_target_query_hits_ground_ahead() {
        let (mut session, mut world) = setup();
        let report = fly(&mut session, &mut world, &FlightPlan::default());
        let target = report.target.unwrap();
        assert!(!target.entity);
        assert!(target.position.z.abs() < 1e-2);
        assert!(target.position.y > world.vehicle().position.y);
        assert!(target.lat_lon.x > 34.0);
    }

    #[test]
    fn test_zoom_and_modes() {
        let (mut session, mut world) = setup();
        let plan = FlightPlan {
            frames: 300,
            zoom_steps: 5,
            mode_switches: 2,
            ..Default::default()
        };
        let report = fly(&mut session, &mut world, &plan);
        assert_eq!(report.mode, CameraMode::Infrared);
        assert_eq!(report.filters, (false, true));
        assert_eq!(report.final_fov, Some(35.0));
        assert_eq!(world.filters(), (false, false));
    }

    #[test]
    fn test_obstacle_never_becomes_ground_point() {
        let (mut session, _) = setup();
        // Hovering; once tilted the camera looks straight into the obstacle.
        let mut world = FlatWorld::new(Vec3::new(0.0, 0.0, 300.0), Vec3::ZERO).with_obstacle(
            Obstacle {
                center: Vec3::new(0.0, 254.0, 0.0),
                radius: 100.0,
            },
        );
        let report = fly(&mut session, &mut world, &FlightPlan::default());

        // Only the frame-0 sample, taken before the tilt finished, reached
        // open ground far ahead.
        let last = report.last.unwrap();
        assert!(last.ground_position.unwrap().y > 2000.0);
        assert_eq!(last.ground_velocity, Vec3::ZERO);
        assert!(report.target.unwrap().entity);
    }
}
