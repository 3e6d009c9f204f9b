//! Zoom easing: moves the rendered field of view toward its target a
//! fraction at a time and snaps once close enough.

/// How the easing factor relates to elapsed time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ZoomEasing {
    /// Apply the factor once per tick regardless of frame time.
    #[default]
    PerFrame,
    /// Rescale the factor so the curve matches `PerFrame` at `reference_hz`
    /// for any frame time.
    TimeScaled {
        /// Frame rate the factor was tuned at.
        reference_hz: f32,
    },
}

impl ZoomEasing {
    /// Fraction of the remaining difference to close this tick.
    pub fn step_fraction(&self, factor: f32, dt: f32) -> f32 {
        match *self {
            ZoomEasing::PerFrame => factor,
            ZoomEasing::TimeScaled { reference_hz } => {
                let frames = (dt * reference_hz).max(0.0);
                1.0 - (1.0 - factor).powf(frames)
            }
        }
    }
}

/// Progress of the zoom toward its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoomState {
    /// Rendered FOV equals the target.
    #[default]
    Settled,
    /// Rendered FOV is still moving toward the target.
    Easing,
}

/// Advance `current` toward `target`. Returns the new value and whether it
/// has reached the target.
pub(crate) fn ease_toward(
    current: f32,
    target: f32,
    fraction: f32,
    snap_threshold: f32,
) -> (f32, ZoomState) {
    let difference = target - current;
    if difference.abs() < snap_threshold {
        return (target, ZoomState::Settled);
    }
    let next = current + difference * fraction;
    if (target - next).abs() < snap_threshold {
        (target, ZoomState::Settled)
    } else {
        (next, ZoomState::Easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_ignores_dt() {
        let easing = ZoomEasing::PerFrame;
        assert_eq!(easing.step_fraction(0.05, 0.001), 0.05);
        assert_eq!(easing.step_fraction(0.05, 1.0), 0.05);
    }

    #[test]
    fn test_time_scaled_matches_per_frame_at_reference_rate() {
        let easing = ZoomEasing::TimeScaled { reference_hz: 60.0 };
        let fraction = easing.step_fraction(0.05, 1.0 / 60.0);
        assert!((fraction - 0.05).abs() < 1e-5, "got {fraction}");
    }

    #[test]
    fn test_time_scaled_two_half_steps_equal_one_full_step() {
        let easing = ZoomEasing::TimeScaled { reference_hz: 60.0 };
        let half = easing.step_fraction(0.05, 1.0 / 120.0);
        let remaining_after_two = (1.0 - half) * (1.0 - half);
        assert!((remaining_after_two - 0.95).abs() < 1e-5);
    }

    #[test]
    fn test_time_scaled_zero_dt_makes_no_progress() {
        let easing = ZoomEasing::TimeScaled { reference_hz: 60.0 };
        assert_eq!(easing.step_fraction(0.05, 0.0), 0.0);
        assert_eq!(easing.step_fraction(0.05, -1.0), 0.0);
    }

    #[test]
    fn test_ease_snaps_when_close() {
        let (fov, state) = ease_toward(49.995, 50.0, 0.05, 0.01);
        assert_eq!(fov, 50.0);
        assert_eq!(state, ZoomState::Settled);
    }

    #[test]
    fn test_ease_moves_fraction_of_difference() {
        let (fov, state) = ease_toward(50.0, 70.0, 0.05, 0.01);
        assert!((fov - 51.0).abs() < 1e-5);
        assert_eq!(state, ZoomState::Easing);
    }
}
