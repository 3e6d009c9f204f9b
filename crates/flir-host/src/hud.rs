//! Messages sent to the web HUD overlay.

use serde::Serialize;

/// Message understood by the HUD bundle, tagged by `type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum HudMessage {
    /// Show or hide the camera HUD.
    #[serde(rename = "ON_HUD_TOGGLE")]
    HudToggle {
        /// Whether the HUD should be visible.
        toggle: bool,
    },
}

impl HudMessage {
    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
