//! Camera pose control: pitch-limited rotation, clamped field of view with
//! eased zoom, forward vector, and display modes.

pub mod controller;
pub mod mode;
pub mod pose;
pub mod zoom;

pub use controller::{PoseController, PoseSettings};
pub use mode::CameraMode;
pub use pose::{CameraPose, FOV_MAX_DEG, FOV_MIN_DEG, PITCH_MAX_DEG, PITCH_MIN_DEG, Rotation};
pub use zoom::{ZoomEasing, ZoomState};
