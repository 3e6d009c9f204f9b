//! In-memory host: flat terrain at z = 0, one vehicle flying a straight
//! line and an optional spherical obstacle standing in for an entity.

use flir_camera::CameraPose;
use flir_host::{CameraHandle, HostBridge};
use flir_telemetry::{EntityHandle, RaycastQuery, RaycastResult, VehicleState};
use glam::Vec3;
use tracing::{debug, trace};

/// A sphere that raycasts report as an entity hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    /// Sphere center.
    pub center: Vec3,
    /// Sphere radius in meters.
    pub radius: f32,
}

impl Obstacle {
    /// Distance along a unit `direction` to the first intersection.
    fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let to_center = origin - self.center;
        let b = to_center.dot(direction);
        let c = to_center.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let t = -b - discriminant.sqrt();
        (t >= 0.0).then_some(t)
    }
}

/// Flat-world host.
#[derive(Debug)]
pub struct FlatWorld {
    vehicle: VehicleState,
    obstacle: Option<Obstacle>,
    camera: Option<(CameraHandle, Vec3)>,
    next_camera: i32,
    rendering: Option<CameraHandle>,
    timecycle: Option<String>,
    night_vision: bool,
    seethrough: bool,
    hud_messages: Vec<String>,
    last_pose: Option<CameraPose>,
    markers_drawn: usize,
}

impl FlatWorld {
    /// A vehicle at `position` moving with constant `velocity`.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            vehicle: VehicleState {
                handle: EntityHandle(1),
                position,
                velocity,
            },
            obstacle: None,
            camera: None,
            next_camera: 1,
            rendering: None,
            timecycle: None,
            night_vision: false,
            seethrough: false,
            hud_messages: Vec::new(),
            last_pose: None,
            markers_drawn: 0,
        }
    }

    /// Place an obstacle in the world.
    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacle = Some(obstacle);
        self
    }

    /// Advance the vehicle by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.vehicle.position += self.vehicle.velocity * dt;
    }

    /// The simulated vehicle.
    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    /// Camera currently rendered, if any.
    pub fn rendering(&self) -> Option<CameraHandle> {
        self.rendering
    }

    /// Active timecycle modifier name.
    pub fn timecycle(&self) -> Option<&str> {
        self.timecycle.as_deref()
    }

    /// Night vision and thermal filter state.
    pub fn filters(&self) -> (bool, bool) {
        (self.night_vision, self.seethrough)
    }

    /// Every HUD message sent so far.
    pub fn hud_messages(&self) -> &[String] {
        &self.hud_messages
    }

    /// Pose most recently pushed to the camera.
    pub fn last_pose(&self) -> Option<&CameraPose> {
        self.last_pose.as_ref()
    }

    /// Number of marker draw calls.
    pub fn markers_drawn(&self) -> usize {
        self.markers_drawn
    }
}

impl RaycastQuery for FlatWorld {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: EntityHandle,
    ) -> RaycastResult {
        let direction = direction.normalize_or_zero();
        let terrain = (direction.z < 0.0)
            .then(|| -origin.z / direction.z)
            .filter(|t| *t >= 0.0 && *t <= max_distance);
        let obstacle = self
            .obstacle
            .and_then(|o| o.intersect(origin, direction))
            .filter(|t| *t <= max_distance);
        let result = match (terrain, obstacle) {
            (_, Some(t)) if terrain.is_none_or(|g| t < g) => {
                RaycastResult::entity(origin + direction * t)
            }
            (Some(t), _) => RaycastResult::terrain(origin + direction * t),
            _ => RaycastResult::miss(),
        };
        trace!(?origin, ?direction, ?ignore, hit = result.hit, "raycast");
        result
    }
}

impl HostBridge for FlatWorld {
    fn current_vehicle(&self) -> Option<VehicleState> {
        Some(self.vehicle)
    }

    fn vehicle_state(&self, vehicle: EntityHandle) -> Option<VehicleState> {
        (vehicle == self.vehicle.handle).then_some(self.vehicle)
    }

    fn create_camera(&mut self, vehicle: EntityHandle, offset: Vec3) -> CameraHandle {
        let handle = CameraHandle(self.next_camera);
        self.next_camera += 1;
        self.camera = Some((handle, offset));
        debug!(?vehicle, ?handle, ?offset, "host camera created");
        handle
    }

    fn destroy_camera(&mut self, camera: CameraHandle) {
        if self.camera.is_some_and(|(h, _)| h == camera) {
            self.camera = None;
        }
        if self.rendering == Some(camera) {
            self.rendering = None;
        }
    }

    fn camera_position(&self, camera: CameraHandle) -> Vec3 {
        match self.camera {
            Some((handle, offset)) if handle == camera => self.vehicle.position + offset,
            _ => self.vehicle.position,
        }
    }

    fn apply_pose(&mut self, _camera: CameraHandle, pose: &CameraPose) {
        self.last_pose = Some(pose.clone());
    }

    fn set_rendering_camera(&mut self, camera: Option<CameraHandle>) {
        self.rendering = camera;
    }

    fn set_timecycle_modifier(&mut self, modifier: Option<(&str, f32)>) {
        self.timecycle = modifier.map(|(name, _)| name.to_string());
    }

    fn set_night_vision(&mut self, enabled: bool) {
        self.night_vision = enabled;
    }

    fn set_seethrough(&mut self, enabled: bool) {
        self.seethrough = enabled;
    }

    fn play_select_sound(&mut self) {
        debug!("select sound");
    }

    fn hide_hud_this_frame(&mut self) {}

    fn send_hud_message(&mut self, json: &str) {
        debug!(json, "hud message");
        self.hud_messages.push(json.to_string());
    }

    fn draw_marker(&mut self, position: Vec3) {
        trace!(?position, "marker");
        self.markers_drawn += 1;
    }
}
