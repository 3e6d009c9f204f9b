//! Pose controller: input-driven rotation and zoom on top of [`CameraPose`].

use flir_config::{CameraConfig, ZoomConfig};
use glam::{Vec2, Vec3};
use tracing::trace;

use crate::pose::{CameraPose, Rotation};
use crate::zoom::{ZoomEasing, ZoomState, ease_toward};

/// Tunables for the pose controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseSettings {
    /// Rotation per unit input is `fov / look_divisor` degrees.
    pub look_divisor: f32,
    /// FOV change per zoom notch in degrees.
    pub zoom_step_deg: f32,
    /// Fraction of the remaining FOV difference closed per easing step.
    pub easing_factor: f32,
    /// Remaining difference below which the FOV snaps to target.
    pub snap_threshold_deg: f32,
    /// Relationship between the easing factor and frame time.
    pub easing: ZoomEasing,
}

impl Default for PoseSettings {
    fn default() -> Self {
        Self {
            look_divisor: 8.0,
            zoom_step_deg: 3.0,
            easing_factor: 0.05,
            snap_threshold_deg: 0.01,
            easing: ZoomEasing::PerFrame,
        }
    }
}

impl PoseSettings {
    /// Build settings from the camera and zoom config sections.
    pub fn from_config(camera: &CameraConfig, zoom: &ZoomConfig) -> Self {
        let easing = if zoom.time_scaled {
            ZoomEasing::TimeScaled {
                reference_hz: zoom.reference_hz,
            }
        } else {
            ZoomEasing::PerFrame
        };
        Self {
            look_divisor: camera.look_divisor,
            zoom_step_deg: zoom.step_deg,
            easing_factor: zoom.easing_factor,
            snap_threshold_deg: zoom.snap_threshold_deg,
            easing,
        }
    }
}

/// Owns the camera pose and the zoom state machine.
///
/// The host polls [`tick`](Self::tick) once per frame; nothing here blocks
/// or spans frames on its own.
#[derive(Clone, Debug)]
pub struct PoseController {
    pose: CameraPose,
    zoom: ZoomState,
    settings: PoseSettings,
}

impl PoseController {
    /// Create a controller at `position` with an initial field of view.
    pub fn new(position: Vec3, field_of_view: f32, settings: PoseSettings) -> Self {
        Self {
            pose: CameraPose::new(position, field_of_view),
            zoom: ZoomState::Settled,
            settings,
        }
    }

    /// Current pose.
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Current zoom progress.
    pub fn zoom_state(&self) -> ZoomState {
        self.zoom
    }

    /// Active settings.
    pub fn settings(&self) -> &PoseSettings {
        &self.settings
    }

    /// Update the camera position reported by the host.
    pub fn set_position(&mut self, position: Vec3) {
        self.pose.position = position;
    }

    /// Apply a rotation delta scaled by the current field of view.
    ///
    /// `delta.x` turns yaw, `delta.y` tilts pitch; both are multiplied by
    /// `fov / look_divisor` so a wide view turns fast and a narrow one turns
    /// finely. Pitch is clamped afterward, yaw is left unbounded.
    pub fn set_rotation(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        let scale = self.pose.field_of_view() / self.settings.look_divisor;
        let current = self.pose.rotation();
        self.pose.set_rotation(Rotation {
            pitch: current.pitch + delta.y * scale,
            yaw: current.yaw + delta.x * scale,
            ..current
        });
    }

    /// Map a look axis (stick or mouse, positive right/down) to a rotation.
    /// A zero axis is a no-op.
    pub fn look(&mut self, axis: Vec2) {
        if axis == Vec2::ZERO {
            return;
        }
        self.set_rotation(-axis);
    }

    /// Set the zoom target, clamped to the FOV limits. The rendered FOV
    /// follows over subsequent ticks.
    pub fn set_field_of_view(&mut self, target: f32) {
        if self.pose.set_target_field_of_view(target)
            && self.pose.target_field_of_view() != self.pose.field_of_view()
        {
            self.zoom = ZoomState::Easing;
        }
    }

    /// Narrow the view by one zoom step.
    pub fn zoom_in(&mut self) {
        self.set_field_of_view(self.pose.target_field_of_view() - self.settings.zoom_step_deg);
    }

    /// Widen the view by one zoom step.
    pub fn zoom_out(&mut self) {
        self.set_field_of_view(self.pose.target_field_of_view() + self.settings.zoom_step_deg);
    }

    /// Advance zoom easing by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> ZoomState {
        if self.zoom == ZoomState::Settled {
            return self.zoom;
        }
        let fraction = self
            .settings
            .easing
            .step_fraction(self.settings.easing_factor, dt);
        let (fov, state) = ease_toward(
            self.pose.field_of_view(),
            self.pose.target_field_of_view(),
            fraction,
            self.settings.snap_threshold_deg,
        );
        self.pose.set_rendered_field_of_view(fov);
        self.zoom = state;
        if state == ZoomState::Settled {
            trace!(fov, "zoom settled");
        }
        state
    }

    /// Unit forward vector of the current rotation.
    pub fn forward_vector(&self) -> Vec3 {
        self.pose.forward_vector()
    }
}
