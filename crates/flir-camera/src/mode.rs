//! Display modes of the camera.

use std::fmt;

/// Image mode the host renders the camera view with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CameraMode {
    /// Plain daylight view.
    #[default]
    Normal,
    /// Host night vision filter.
    Night,
    /// Host thermal see-through filter.
    Infrared,
}

impl CameraMode {
    /// Next mode in the switch cycle: Normal, Night, Infrared, Normal.
    pub fn next(self) -> Self {
        match self {
            CameraMode::Normal => CameraMode::Night,
            CameraMode::Night => CameraMode::Infrared,
            CameraMode::Infrared => CameraMode::Normal,
        }
    }

    /// Whether the host night vision filter is on in this mode.
    pub fn night_vision(self) -> bool {
        self == CameraMode::Night
    }

    /// Whether the host thermal filter is on in this mode.
    pub fn thermal(self) -> bool {
        self == CameraMode::Infrared
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CameraMode::Normal => "normal",
            CameraMode::Night => "night",
            CameraMode::Infrared => "infrared",
        };
        f.write_str(name)
    }
}
