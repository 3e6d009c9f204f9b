//! The vehicle-mounted camera and its rendering side effects.
//!
//! Pose state lives in [`PoseController`] and is pure. Turning the view on
//! or off touches host rendering state, so those transitions are explicit
//! [`FlirCamera::enable`] / [`FlirCamera::disable`] calls rather than a
//! property write.

use flir_camera::{CameraMode, PoseController, PoseSettings};
use flir_telemetry::EntityHandle;
use glam::Vec3;
use tracing::{info, warn};

use crate::bridge::{CameraHandle, HostBridge};
use crate::hud::HudMessage;
use crate::scheduler::{FrameHandle, FrameScheduler, FrameTask};

/// Timecycle modifier applied while viewing through the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Timecycle {
    /// Host modifier name.
    pub name: String,
    /// Modifier strength.
    pub strength: f32,
}

/// A scripted camera attached to a vehicle.
#[derive(Debug)]
pub struct FlirCamera {
    handle: CameraHandle,
    vehicle: EntityHandle,
    controller: PoseController,
    mode: CameraMode,
    enabled: bool,
    overlay: Option<FrameHandle>,
    timecycle: Timecycle,
}

impl FlirCamera {
    /// Create a host camera on `vehicle` at `offset`. The camera starts
    /// disabled in [`CameraMode::Normal`].
    pub fn attach(
        host: &mut (impl HostBridge + ?Sized),
        vehicle: EntityHandle,
        offset: Vec3,
        field_of_view: f32,
        settings: PoseSettings,
        timecycle: Timecycle,
    ) -> Self {
        let handle = host.create_camera(vehicle, offset);
        let position = host.camera_position(handle);
        info!(?vehicle, ?handle, "camera attached");
        Self {
            handle,
            vehicle,
            controller: PoseController::new(position, field_of_view, settings),
            mode: CameraMode::Normal,
            enabled: false,
            overlay: None,
            timecycle,
        }
    }

    /// Host camera handle.
    pub fn handle(&self) -> CameraHandle {
        self.handle
    }

    /// Vehicle carrying the camera.
    pub fn vehicle(&self) -> EntityHandle {
        self.vehicle
    }

    /// Whether the player is viewing through the camera.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current display mode.
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Pose controller.
    pub fn controller(&self) -> &PoseController {
        &self.controller
    }

    /// Mutable pose controller.
    pub fn controller_mut(&mut self) -> &mut PoseController {
        &mut self.controller
    }

    /// Start rendering through the camera. Returns `false` if it was
    /// already enabled.
    pub fn enable(
        &mut self,
        host: &mut (impl HostBridge + ?Sized),
        scheduler: &mut (impl FrameScheduler + ?Sized),
    ) -> bool {
        if self.enabled {
            return false;
        }
        self.enabled = true;
        host.set_rendering_camera(Some(self.handle));
        host.set_timecycle_modifier(Some((&self.timecycle.name, self.timecycle.strength)));
        self.apply_mode(host);
        send_hud(host, HudMessage::HudToggle { toggle: true });
        self.overlay = match scheduler.register_per_frame(FrameTask::Overlay) {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(%err, "failed to register overlay task");
                None
            }
        };
        info!(mode = %self.mode, "camera enabled");
        true
    }

    /// Stop rendering through the camera. Returns `false` if it was
    /// already disabled.
    pub fn disable(
        &mut self,
        host: &mut (impl HostBridge + ?Sized),
        scheduler: &mut (impl FrameScheduler + ?Sized),
    ) -> bool {
        if !self.enabled {
            return false;
        }
        self.enabled = false;
        host.set_rendering_camera(None);
        host.set_timecycle_modifier(None);
        host.set_night_vision(false);
        host.set_seethrough(false);
        send_hud(host, HudMessage::HudToggle { toggle: false });
        if let Some(handle) = self.overlay.take()
            && let Err(err) = scheduler.unregister(handle)
        {
            warn!(%err, "failed to unregister overlay task");
        }
        info!("camera disabled");
        true
    }

    /// Change the display mode. Host filters only change while enabled;
    /// a disabled camera remembers the mode for the next enable.
    pub fn switch_mode(&mut self, mode: CameraMode, host: &mut (impl HostBridge + ?Sized)) {
        self.mode = mode;
        if !self.enabled {
            return;
        }
        self.apply_mode(host);
        host.play_select_sound();
    }

    fn apply_mode(&self, host: &mut (impl HostBridge + ?Sized)) {
        host.set_night_vision(false);
        host.set_seethrough(false);
        if self.mode.night_vision() {
            host.set_night_vision(true);
        }
        if self.mode.thermal() {
            host.set_seethrough(true);
        }
    }

    /// Disable and delete the host camera.
    pub fn dispose(
        mut self,
        host: &mut (impl HostBridge + ?Sized),
        scheduler: &mut (impl FrameScheduler + ?Sized),
    ) {
        self.disable(host, scheduler);
        host.destroy_camera(self.handle);
        info!(handle = ?self.handle, "camera destroyed");
    }
}

fn send_hud(host: &mut (impl HostBridge + ?Sized), message: HudMessage) {
    match message.to_json() {
        Ok(json) => host.send_hud_message(&json),
        Err(err) => warn!(%err, ?message, "dropping HUD message"),
    }
}
