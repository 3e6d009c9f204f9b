//! Input the host polls each frame and hands to the session.

use glam::Vec2;

/// Scroll wheel state for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollInput {
    /// No scroll this frame.
    #[default]
    None,
    /// Scroll up was just pressed: zoom in.
    Up,
    /// Scroll down was just pressed: zoom out.
    Down,
}

/// Per-frame input snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Scroll wheel edge.
    pub scroll: ScrollInput,
    /// Normalized look axis, positive right and down.
    pub look: Vec2,
}
