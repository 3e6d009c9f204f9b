//! The plugin's process-wide context: owns the scheduler, the attached
//! camera and the ground tracker, and dispatches per-frame work.

use flir_camera::PoseSettings;
use flir_config::Config;
use flir_geo::{GeoReference, LatLon};
use flir_telemetry::{
    EntityHandle, GroundTrack, GroundTracker, TelemetrySnapshot, Timestamp, TrackerSettings,
};
use glam::Vec3;
use tracing::{debug, info, warn};

use crate::bridge::HostBridge;
use crate::camera::{FlirCamera, Timecycle};
use crate::command::{Command, CommandOutcome, TargetFix};
use crate::input::{FrameInput, ScrollInput};
use crate::scheduler::{FrameHandle, FrameScheduler, FrameTask};

/// Tasks registered for as long as a camera is attached. The overlay task
/// is owned by [`FlirCamera`] and only lives while the view is enabled.
const ATTACHED_TASKS: [FrameTask; 5] = [
    FrameTask::Controls,
    FrameTask::Rotation,
    FrameTask::Zoom,
    FrameTask::Telemetry,
    FrameTask::Marker,
];

/// Session tunables, usually derived from [`Config`].
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSettings {
    /// Pose controller settings.
    pub pose: PoseSettings,
    /// Ground tracker settings.
    pub tracker: TrackerSettings,
    /// Geo projection anchor.
    pub geo: GeoReference,
    /// Camera mount offset relative to the vehicle.
    pub mount_offset: Vec3,
    /// Field of view when a camera is first attached.
    pub initial_fov_deg: f32,
    /// Timecycle modifier while viewing.
    pub timecycle: Timecycle,
    /// Log a telemetry summary on every refresh.
    pub trace_samples: bool,
}

impl SessionSettings {
    /// Derive settings from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            pose: PoseSettings::from_config(&config.camera, &config.zoom),
            tracker: TrackerSettings::from(&config.tracking),
            geo: GeoReference::from(&config.geo),
            mount_offset: Vec3::from_array(config.camera.mount_offset),
            initial_fov_deg: config.camera.initial_fov_deg,
            timecycle: Timecycle {
                name: config.camera.timecycle_modifier.clone(),
                strength: config.camera.timecycle_strength,
            },
            trace_samples: config.debug.trace_samples,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug)]
struct Attachment {
    camera: FlirCamera,
    tracker: GroundTracker,
    tasks: Vec<FrameHandle>,
    last_frame: Option<Timestamp>,
    telemetry: Option<TelemetrySnapshot>,
}

/// Camera session driven by the host.
///
/// Created once when the plugin loads. A camera is attached lazily on the
/// first `cam` command and lives until [`detach`](Self::detach).
pub struct FlirSession<S: FrameScheduler> {
    scheduler: S,
    settings: SessionSettings,
    attachment: Option<Attachment>,
}

impl<S: FrameScheduler> FlirSession<S> {
    /// Create a session with no camera attached.
    pub fn new(scheduler: S, settings: SessionSettings) -> Self {
        Self {
            scheduler,
            settings,
            attachment: None,
        }
    }

    /// The scheduler capability.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Active settings.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Whether a camera is attached.
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// The attached camera, if any.
    pub fn camera(&self) -> Option<&FlirCamera> {
        self.attachment.as_ref().map(|a| &a.camera)
    }

    /// Whether the player is viewing through the camera.
    pub fn is_enabled(&self) -> bool {
        self.camera().is_some_and(FlirCamera::is_enabled)
    }

    /// Ground track of the attached camera.
    pub fn track(&self) -> Option<&GroundTrack> {
        self.attachment.as_ref().map(|a| a.tracker.track())
    }

    /// Most recent telemetry snapshot.
    pub fn telemetry(&self) -> Option<&TelemetrySnapshot> {
        self.attachment.as_ref().and_then(|a| a.telemetry.as_ref())
    }

    /// Set the zoom target directly. No-op without a camera.
    pub fn set_field_of_view(&mut self, target: f32) {
        if let Some(attachment) = self.attachment.as_mut() {
            attachment.camera.controller_mut().set_field_of_view(target);
        }
    }

    /// Run a chat command.
    pub fn execute(&mut self, host: &mut impl HostBridge, command: Command) -> CommandOutcome {
        debug!(command = command.name(), "executing command");
        match command {
            Command::ToggleCamera => self.toggle_camera(host),
            Command::SwitchMode => {
                let Some(attachment) = self.attachment.as_mut() else {
                    return CommandOutcome::NotAttached;
                };
                let mode = attachment.camera.mode().next();
                attachment.camera.switch_mode(mode, host);
                info!(%mode, "camera mode switched");
                CommandOutcome::ModeSwitched(mode)
            }
            Command::Target => match self.query_target(&*host) {
                Some(fix) => CommandOutcome::Target(fix),
                None => CommandOutcome::NotAttached,
            },
        }
    }

    fn toggle_camera(&mut self, host: &mut impl HostBridge) -> CommandOutcome {
        if self.attachment.is_none() {
            let Some(vehicle) = host.current_vehicle() else {
                return CommandOutcome::NoVehicle;
            };
            self.attach(host, vehicle.handle);
        }
        let Self {
            scheduler,
            attachment,
            ..
        } = self;
        let Some(attachment) = attachment.as_mut() else {
            return CommandOutcome::NotAttached;
        };
        let camera = &mut attachment.camera;
        if camera.is_enabled() {
            camera.disable(host, scheduler);
        } else {
            camera.enable(host, scheduler);
        }
        CommandOutcome::Toggled(camera.is_enabled())
    }

    fn attach(&mut self, host: &mut impl HostBridge, vehicle: EntityHandle) {
        let camera = FlirCamera::attach(
            host,
            vehicle,
            self.settings.mount_offset,
            self.settings.initial_fov_deg,
            self.settings.pose,
            self.settings.timecycle.clone(),
        );
        let tasks = ATTACHED_TASKS
            .iter()
            .filter_map(|&task| match self.scheduler.register_per_frame(task) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    warn!(%err, ?task, "failed to register frame task");
                    None
                }
            })
            .collect();
        self.attachment = Some(Attachment {
            camera,
            tracker: GroundTracker::new(self.settings.tracker),
            tasks,
            last_frame: None,
            telemetry: None,
        });
    }

    /// One-shot raycast along the camera's view. `None` without a camera,
    /// `Some(None)` when the ray hits nothing.
    pub fn query_target(&self, host: &impl HostBridge) -> Option<Option<TargetFix>> {
        let attachment = self.attachment.as_ref()?;
        let pose = attachment.camera.controller().pose();
        let result = host.cast(
            pose.position,
            pose.forward_vector(),
            self.settings.tracker.ray_length,
            attachment.camera.vehicle(),
        );
        if !result.hit {
            info!("target query hit nothing");
            return Some(None);
        }
        let lat_lon = self.settings.geo.to_lat_lon(result.hit_position);
        info!(
            position = ?result.hit_position,
            coords = %LatLon(lat_lon),
            entity = result.hit_entity,
            "target acquired"
        );
        Some(Some(TargetFix {
            position: result.hit_position,
            lat_lon,
            entity: result.hit_entity,
        }))
    }

    /// Run this frame's registered tasks. Returns the telemetry snapshot if
    /// the ground tracker sampled this frame.
    ///
    /// Pose tasks (zoom input, look input, zoom easing) run first and the
    /// pose is pushed to the host before any raycast.
    pub fn run_frame(
        &mut self,
        host: &mut impl HostBridge,
        now: Timestamp,
        input: &FrameInput,
    ) -> Option<TelemetrySnapshot> {
        let attachment = self.attachment.as_mut()?;
        let dt = attachment
            .last_frame
            .map_or(0.0, |last| now.seconds_since(last));
        attachment.last_frame = Some(now);

        let handle = attachment.camera.handle();
        let position = host.camera_position(handle);
        attachment.camera.controller_mut().set_position(position);

        let tasks = self.scheduler.active_tasks();
        let enabled = attachment.camera.is_enabled();

        for task in tasks.iter().filter(|t| t.updates_pose()) {
            let controller = attachment.camera.controller_mut();
            match task {
                FrameTask::Controls if enabled => match input.scroll {
                    ScrollInput::Up => controller.zoom_in(),
                    ScrollInput::Down => controller.zoom_out(),
                    ScrollInput::None => {}
                },
                FrameTask::Rotation if enabled => controller.look(input.look),
                FrameTask::Zoom => {
                    controller.tick(dt);
                }
                _ => {}
            }
        }
        host.apply_pose(handle, attachment.camera.controller().pose());

        let mut refreshed = None;
        for task in tasks.iter().filter(|t| !t.updates_pose()) {
            match task {
                FrameTask::Overlay if enabled => host.hide_hud_this_frame(),
                FrameTask::Telemetry => {
                    let pose = attachment.camera.controller().pose();
                    let vehicle = attachment.camera.vehicle();
                    if attachment
                        .tracker
                        .poll(pose, now, &*host, vehicle)
                        .is_none()
                    {
                        continue;
                    }
                    let Some(state) = host.vehicle_state(vehicle) else {
                        warn!(?vehicle, "camera vehicle no longer exists");
                        continue;
                    };
                    let snapshot = TelemetrySnapshot::compute(
                        &state,
                        attachment.tracker.track(),
                        &self.settings.geo,
                    );
                    if self.settings.trace_samples {
                        debug!(summary = %snapshot.summary(), "telemetry");
                    }
                    attachment.telemetry = Some(snapshot);
                    refreshed = Some(snapshot);
                }
                FrameTask::Marker => {
                    let track = attachment.tracker.track();
                    if track.is_valid() {
                        host.draw_marker(track.ground_position);
                    }
                }
                _ => {}
            }
        }
        refreshed
    }

    /// Disable and destroy the camera and unregister its frame tasks.
    /// No-op without a camera.
    pub fn detach(&mut self, host: &mut impl HostBridge) {
        let Some(attachment) = self.attachment.take() else {
            return;
        };
        for handle in attachment.tasks {
            if let Err(err) = self.scheduler.unregister(handle) {
                warn!(%err, "failed to unregister frame task");
            }
        }
        attachment.camera.dispose(host, &mut self.scheduler);
        info!("camera detached");
    }
}
