//! Per-cycle telemetry report combining the host vehicle and the ground
//! track, ready for an external display.

use flir_geo::{GeoReference, LatLon};
use glam::{DVec2, Vec3};

use crate::raycast::EntityHandle;
use crate::tracker::GroundTrack;

/// State of the vehicle carrying the camera, read from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
    /// Host handle, excluded from tracking raycasts.
    pub handle: EntityHandle,
    /// World position.
    pub position: Vec3,
    /// World velocity in units per second.
    pub velocity: Vec3,
}

/// Telemetry values derived each tracking cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TelemetrySnapshot {
    /// Vehicle world position.
    pub position: Vec3,
    /// Vehicle velocity.
    pub velocity: Vec3,
    /// Vehicle speed in meters per second.
    pub speed: f32,
    /// Height above mean sea level (world z = 0) in meters.
    pub amsl: f32,
    /// Vehicle latitude (x) and longitude west (y).
    pub lat_lon: DVec2,
    /// Tracked ground point, `None` before the first accepted hit.
    pub ground_position: Option<Vec3>,
    /// Estimated ground point velocity.
    pub ground_velocity: Vec3,
    /// Ground point speed.
    pub ground_speed: f32,
    /// Distance from the vehicle to the ground point.
    pub ground_distance: Option<f32>,
    /// Ground point latitude (x) and longitude west (y).
    pub ground_lat_lon: Option<DVec2>,
}

impl TelemetrySnapshot {
    /// Build a snapshot from the vehicle state and the current ground track.
    pub fn compute(vehicle: &VehicleState, track: &GroundTrack, geo: &GeoReference) -> Self {
        let ground_position = track.is_valid().then_some(track.ground_position);
        Self {
            position: vehicle.position,
            velocity: vehicle.velocity,
            speed: vehicle.velocity.length(),
            amsl: vehicle.position.z,
            lat_lon: geo.to_lat_lon(vehicle.position),
            ground_position,
            ground_velocity: track.ground_velocity,
            ground_speed: track.ground_speed(),
            ground_distance: ground_position.map(|g| g.distance(vehicle.position)),
            ground_lat_lon: ground_position.map(|g| geo.to_lat_lon(g)),
        }
    }

    /// One-line summary for logs and debug overlays.
    pub fn summary(&self) -> String {
        match (self.ground_lat_lon, self.ground_distance) {
            (Some(ll), Some(distance)) => format!(
                "alt {:.0}m spd {:.1}m/s | tgt {} rng {:.0}m gs {:.1}m/s",
                self.amsl,
                self.speed,
                LatLon(ll),
                distance,
                self.ground_speed,
            ),
            _ => format!(
                "alt {:.0}m spd {:.1}m/s | tgt --",
                self.amsl, self.speed
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Timestamp;

    fn vehicle() -> VehicleState {
        VehicleState {
            handle: EntityHandle(1),
            position: Vec3::new(0.0, 0.0, 120.0),
            velocity: Vec3::new(3.0, 4.0, 0.0),
        }
    }

    #[test]
    fn test_snapshot_without_track() {
        let snap = TelemetrySnapshot::compute(
            &vehicle(),
            &GroundTrack::default(),
            &GeoReference::default(),
        );
        assert_eq!(snap.speed, 5.0);
        assert_eq!(snap.amsl, 120.0);
        assert_eq!(snap.lat_lon, DVec2::new(34.0, 118.0));
        assert!(snap.ground_position.is_none());
        assert!(snap.ground_distance.is_none());
        assert!(snap.summary().ends_with("tgt --"));
    }

    #[test]
    fn test_snapshot_with_track() {
        let track = GroundTrack {
            ground_position: Vec3::new(0.0, 50.0, 0.0),
            ground_velocity: Vec3::new(0.0, 2.0, 0.0),
            last_update: Some(Timestamp::from_millis(10)),
        };
        let geo = GeoReference::default();
        let snap = TelemetrySnapshot::compute(&vehicle(), &track, &geo);
        assert_eq!(snap.ground_distance, Some(130.0));
        assert_eq!(snap.ground_speed, 2.0);
        let ll = snap.ground_lat_lon.unwrap();
        assert!(ll.x > 34.0);
        assert_eq!(ll.y, 118.0);
        assert!(snap.summary().contains("rng 130m"));
    }
}
