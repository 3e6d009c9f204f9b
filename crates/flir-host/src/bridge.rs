//! Host-provided primitives the camera is built from.

use flir_camera::CameraPose;
use flir_telemetry::{EntityHandle, RaycastQuery, VehicleState};
use glam::Vec3;

/// Handle of a scripted camera created by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CameraHandle(pub i32);

/// Everything the plugin asks of the game runtime.
///
/// Implementations wrap the host's native calls. All methods are called
/// from the host's frame thread.
pub trait HostBridge: RaycastQuery {
    /// Vehicle the local player is sitting in, if any.
    fn current_vehicle(&self) -> Option<VehicleState>;

    /// Latest state of a vehicle, or `None` if it no longer exists.
    fn vehicle_state(&self, vehicle: EntityHandle) -> Option<VehicleState>;

    /// Create a scripted camera attached to `vehicle` at `offset`.
    fn create_camera(&mut self, vehicle: EntityHandle, offset: Vec3) -> CameraHandle;

    /// Detach and delete a camera.
    fn destroy_camera(&mut self, camera: CameraHandle);

    /// World position of a camera.
    fn camera_position(&self, camera: CameraHandle) -> Vec3;

    /// Push rotation and rendered field of view to the host camera.
    fn apply_pose(&mut self, camera: CameraHandle, pose: &CameraPose);

    /// Render through `camera`, or back to the gameplay camera for `None`.
    fn set_rendering_camera(&mut self, camera: Option<CameraHandle>);

    /// Apply a named timecycle modifier at a strength, or clear it.
    fn set_timecycle_modifier(&mut self, modifier: Option<(&str, f32)>);

    /// Toggle the night vision filter.
    fn set_night_vision(&mut self, enabled: bool);

    /// Toggle the thermal see-through filter.
    fn set_seethrough(&mut self, enabled: bool);

    /// Play the front-end "select" sound.
    fn play_select_sound(&mut self);

    /// Hide area names, HUD, radar and help text for this frame.
    fn hide_hud_this_frame(&mut self);

    /// Send a JSON message to the HUD overlay. Fire and forget.
    fn send_hud_message(&mut self, json: &str);

    /// Draw the ground marker at `position` for this frame.
    fn draw_marker(&mut self, position: Vec3);
}
