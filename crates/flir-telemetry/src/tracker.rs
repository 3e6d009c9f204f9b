//! Ground tracker: follows the static-terrain point the camera looks at and
//! estimates its velocity by finite differences.
//!
//! Only static-terrain hits move the track. A vehicle briefly crossing the
//! ray would otherwise register as a jump of hundreds of meters in one
//! sample, so entity hits and misses leave the last good value in place.

use flir_camera::CameraPose;
use flir_config::TrackingConfig;
use glam::Vec3;
use tracing::{debug, trace};

use crate::clock::Timestamp;
use crate::raycast::{EntityHandle, RaycastQuery};

/// Tracker tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerSettings {
    /// Minimum time between samples taken through [`GroundTracker::poll`].
    pub poll_interval_ms: u64,
    /// Length of the tracking ray in world units.
    pub ray_length: f32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            ray_length: 10_000.0,
        }
    }
}

impl From<&TrackingConfig> for TrackerSettings {
    fn from(config: &TrackingConfig) -> Self {
        Self {
            poll_interval_ms: config.poll_interval_ms,
            ray_length: config.ray_length,
        }
    }
}

/// The tracked ground point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroundTrack {
    /// Last accepted static-terrain hit.
    pub ground_position: Vec3,
    /// Estimated velocity of the ground point in units per second.
    pub ground_velocity: Vec3,
    /// When the last hit was accepted; `None` until the first one.
    pub last_update: Option<Timestamp>,
}

impl GroundTrack {
    /// Whether at least one terrain hit has been accepted.
    pub fn is_valid(&self) -> bool {
        self.last_update.is_some()
    }

    /// Magnitude of the ground velocity.
    pub fn ground_speed(&self) -> f32 {
        self.ground_velocity.length()
    }
}

/// What a single sample did to the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleOutcome {
    /// A terrain hit was accepted and the track updated.
    Accepted,
    /// The ray struck nothing.
    Missed,
    /// The ray struck a dynamic entity; the track was left alone.
    EntityRejected,
}

/// Maintains a [`GroundTrack`] from periodic raycasts.
#[derive(Clone, Debug, Default)]
pub struct GroundTracker {
    settings: TrackerSettings,
    track: GroundTrack,
    last_poll: Option<Timestamp>,
}

impl GroundTracker {
    /// Create an empty tracker.
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            track: GroundTrack::default(),
            last_poll: None,
        }
    }

    /// Current track.
    pub fn track(&self) -> &GroundTrack {
        &self.track
    }

    /// Active settings.
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Forget the track and the polling cadence.
    pub fn reset(&mut self) {
        self.track = GroundTrack::default();
        self.last_poll = None;
    }

    /// Sample if at least one poll interval has passed since the last
    /// polled sample. Returns `None` when throttled.
    pub fn poll(
        &mut self,
        pose: &CameraPose,
        now: Timestamp,
        world: &(impl RaycastQuery + ?Sized),
        ignore: EntityHandle,
    ) -> Option<SampleOutcome> {
        if let Some(last) = self.last_poll
            && now.millis_since(last) < self.settings.poll_interval_ms
        {
            return None;
        }
        self.last_poll = Some(now);
        Some(self.sample(pose, now, world, ignore))
    }

    /// Cast a ray from the camera pose and fold the result into the track.
    pub fn sample(
        &mut self,
        pose: &CameraPose,
        now: Timestamp,
        world: &(impl RaycastQuery + ?Sized),
        ignore: EntityHandle,
    ) -> SampleOutcome {
        let result = world.cast(
            pose.position,
            pose.forward_vector(),
            self.settings.ray_length,
            ignore,
        );

        if !result.hit {
            trace!("ground ray missed");
            return SampleOutcome::Missed;
        }
        if result.hit_entity {
            trace!(position = ?result.hit_position, "ground ray blocked by entity");
            return SampleOutcome::EntityRejected;
        }

        self.accept(result.hit_position, now);
        SampleOutcome::Accepted
    }

    fn accept(&mut self, position: Vec3, now: Timestamp) {
        match self.track.last_update {
            None => self.track.ground_velocity = Vec3::ZERO,
            Some(last) => {
                let dt = now.seconds_since(last);
                if dt > 0.0 {
                    self.track.ground_velocity = (position - self.track.ground_position) / dt;
                }
            }
        }
        self.track.ground_position = position;
        self.track.last_update = Some(now);
        debug!(
            position = ?position,
            velocity = ?self.track.ground_velocity,
            "ground sample accepted"
        );
    }
}
