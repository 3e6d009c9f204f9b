//! Chat commands exposed by the plugin.

use std::str::FromStr;

use flir_camera::CameraMode;
use glam::{DVec2, Vec3};

/// A command registered with the host's chat command surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `cam`: attach a camera to the current vehicle if needed and toggle it.
    ToggleCamera,
    /// `switchmode`: cycle the display mode.
    SwitchMode,
    /// `target`: one-shot query of what the camera is pointing at.
    Target,
}

impl Command {
    /// Chat name of the command.
    pub fn name(self) -> &'static str {
        match self {
            Command::ToggleCamera => "cam",
            Command::SwitchMode => "switchmode",
            Command::Target => "target",
        }
    }

    /// All commands, for registration with the host.
    pub const ALL: [Command; 3] = [Command::ToggleCamera, Command::SwitchMode, Command::Target];
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/') {
            "cam" => Ok(Command::ToggleCamera),
            "switchmode" => Ok(Command::SwitchMode),
            "target" => Ok(Command::Target),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Where the camera is pointing, from a one-shot `target` query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetFix {
    /// World hit position.
    pub position: Vec3,
    /// Latitude (x) and longitude west (y) of the hit.
    pub lat_lon: DVec2,
    /// Whether the hit was a dynamic entity.
    pub entity: bool,
}

/// Result of executing a [`Command`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandOutcome {
    /// The camera was toggled; carries the new enabled state.
    Toggled(bool),
    /// `cam` was issued outside a vehicle.
    NoVehicle,
    /// The display mode changed.
    ModeSwitched(CameraMode),
    /// Result of a `target` query; `None` when the ray hit nothing.
    Target(Option<TargetFix>),
    /// The command needs an attached camera and there is none.
    NotAttached,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>(), Ok(command));
        }
        assert_eq!("/cam".parse::<Command>(), Ok(Command::ToggleCamera));
        assert!("hello_server".parse::<Command>().is_err());
    }
}
