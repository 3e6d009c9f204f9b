//! Monotonic game-timer readings.

/// A reading of the host's monotonic millisecond game timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds since the host timer started.
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`. Saturates to zero if the clock
    /// appears to have gone backwards.
    pub fn seconds_since(self, earlier: Timestamp) -> f32 {
        self.0.saturating_sub(earlier.0) as f32 / 1000.0
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    pub fn millis_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}
