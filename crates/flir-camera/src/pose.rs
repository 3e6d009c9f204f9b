//! Camera pose state and its clamping invariants.

use glam::Vec3;

/// Lowest pitch the host renderer handles without flipping (degrees).
pub const PITCH_MIN_DEG: f32 = -89.5;
/// Highest pitch; the mount sits under the vehicle so it cannot look far up.
pub const PITCH_MAX_DEG: f32 = 15.0;
/// Narrowest field of view in degrees.
pub const FOV_MIN_DEG: f32 = 1.0;
/// Widest field of view in degrees.
pub const FOV_MAX_DEG: f32 = 130.0;

/// Euler rotation in degrees, in the host's convention (pitch about X,
/// roll about Y, yaw about Z).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    /// Pitch in degrees. Negative looks down.
    pub pitch: f32,
    /// Roll in degrees.
    pub roll: f32,
    /// Yaw (heading) in degrees. Unbounded.
    pub yaw: f32,
}

impl Rotation {
    /// Create a rotation from pitch, roll and yaw in degrees.
    pub fn new(pitch: f32, roll: f32, yaw: f32) -> Self {
        Self { pitch, roll, yaw }
    }

    /// Unit forward vector for this rotation.
    ///
    /// Yaw 0 looks along +Y; positive pitch tilts toward +Z.
    pub fn forward_vector(&self) -> Vec3 {
        let pitch = self.pitch.to_radians();
        let yaw = self.yaw.to_radians();
        let horizontal = pitch.cos().abs();
        Vec3::new(-yaw.sin() * horizontal, yaw.cos() * horizontal, pitch.sin())
    }
}

/// Mutable camera state.
///
/// Pitch stays within [`PITCH_MIN_DEG`, `PITCH_MAX_DEG`] and the target
/// field of view within [`FOV_MIN_DEG`, `FOV_MAX_DEG`]; every setter enforces
/// this.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraPose {
    /// World position of the camera, written from the host each frame.
    pub position: Vec3,
    rotation: Rotation,
    field_of_view: f32,
    target_field_of_view: f32,
}

impl CameraPose {
    /// Create a pose at `position` looking along +Y with the given FOV.
    pub fn new(position: Vec3, field_of_view: f32) -> Self {
        let fov = clamp_fov(field_of_view).unwrap_or(FOV_MAX_DEG);
        Self {
            position,
            rotation: Rotation::default(),
            field_of_view: fov,
            target_field_of_view: fov,
        }
    }

    /// Current rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Replace the rotation, clamping pitch. Non-finite components are
    /// rejected and leave the rotation unchanged.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        if !(rotation.pitch.is_finite() && rotation.yaw.is_finite() && rotation.roll.is_finite()) {
            return;
        }
        self.rotation = Rotation {
            pitch: rotation.pitch.clamp(PITCH_MIN_DEG, PITCH_MAX_DEG),
            ..rotation
        };
    }

    /// The field of view currently rendered.
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// The field of view the zoom is easing toward.
    pub fn target_field_of_view(&self) -> f32 {
        self.target_field_of_view
    }

    /// Store a new clamped target. NaN is ignored. Returns whether the target
    /// was accepted.
    pub fn set_target_field_of_view(&mut self, target: f32) -> bool {
        match clamp_fov(target) {
            Some(fov) => {
                self.target_field_of_view = fov;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_rendered_field_of_view(&mut self, fov: f32) {
        self.field_of_view = fov;
    }

    /// Unit forward vector of the current rotation.
    pub fn forward_vector(&self) -> Vec3 {
        self.rotation.forward_vector()
    }
}

fn clamp_fov(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(FOV_MIN_DEG, FOV_MAX_DEG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_forward_at_zero_rotation_is_plus_y() {
        let fwd = Rotation::default().forward_vector();
        assert!((fwd - Vec3::Y).length() < EPSILON);
    }

    #[test]
    fn test_forward_yaw_90_is_minus_x() {
        let fwd = Rotation::new(0.0, 0.0, 90.0).forward_vector();
        assert!((fwd - Vec3::NEG_X).length() < EPSILON, "got {fwd:?}");
    }

    #[test]
    fn test_forward_pitch_down_points_down() {
        let fwd = Rotation::new(-89.5, 0.0, 0.0).forward_vector();
        assert!(fwd.z < -0.99);
        assert!(fwd.y > 0.0);
    }

    #[test]
    fn test_forward_is_unit_length() {
        for (pitch, yaw) in [(-45.0, 30.0), (10.0, -170.0), (-89.5, 725.0)] {
            let fwd = Rotation::new(pitch, 0.0, yaw).forward_vector();
            assert!((fwd.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_set_rotation_clamps_pitch() {
        let mut pose = CameraPose::new(Vec3::ZERO, 50.0);
        pose.set_rotation(Rotation::new(-120.0, 0.0, 10.0));
        assert_eq!(pose.rotation().pitch, PITCH_MIN_DEG);
        assert_eq!(pose.rotation().yaw, 10.0);

        pose.set_rotation(Rotation::new(40.0, 0.0, 10.0));
        assert_eq!(pose.rotation().pitch, PITCH_MAX_DEG);
    }

    #[test]
    fn test_set_rotation_rejects_nan() {
        let mut pose = CameraPose::new(Vec3::ZERO, 50.0);
        pose.set_rotation(Rotation::new(-10.0, 0.0, 5.0));
        pose.set_rotation(Rotation::new(f32::NAN, 0.0, 0.0));
        assert_eq!(pose.rotation(), Rotation::new(-10.0, 0.0, 5.0));
    }

    #[test]
    fn test_target_fov_clamped() {
        let mut pose = CameraPose::new(Vec3::ZERO, 50.0);
        pose.set_target_field_of_view(200.0);
        assert_eq!(pose.target_field_of_view(), FOV_MAX_DEG);
        pose.set_target_field_of_view(-5.0);
        assert_eq!(pose.target_field_of_view(), FOV_MIN_DEG);
        assert!(!pose.set_target_field_of_view(f32::NAN));
        assert_eq!(pose.target_field_of_view(), FOV_MIN_DEG);
        // Rendered FOV is untouched by target writes.
        assert_eq!(pose.field_of_view(), 50.0);
    }

    #[test]
    fn test_new_clamps_initial_fov() {
        let pose = CameraPose::new(Vec3::ZERO, 0.1);
        assert_eq!(pose.field_of_view(), FOV_MIN_DEG);
        assert_eq!(pose.target_field_of_view(), FOV_MIN_DEG);
    }
}
