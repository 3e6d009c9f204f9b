//! Ground-tracking telemetry: raycasts from the camera pose, tracks the
//! static-terrain point under the crosshair, and estimates its velocity.

pub mod clock;
pub mod raycast;
pub mod snapshot;
pub mod tracker;

pub use clock::Timestamp;
pub use raycast::{EntityHandle, RaycastQuery, RaycastResult};
pub use snapshot::{TelemetrySnapshot, VehicleState};
pub use tracker::{GroundTrack, GroundTracker, SampleOutcome, TrackerSettings};
