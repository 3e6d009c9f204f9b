//! Geo projection: world positions to latitude/longitude.
//!
//! The game world is a bounded flat simulation space, so instead of a true
//! ellipsoid this crate uses a local equirectangular approximation anchored
//! at a configurable reference point. Accuracy degrades with distance from
//! the anchor and there is no antimeridian or pole wraparound.

use std::f64::consts::PI;
use std::fmt;

use flir_config::GeoConfig;
use glam::{DVec2, Vec3};

/// Earth radius in meters used by the default reference.
pub const EARTH_RADIUS_M: f64 = 6.3781e6;

/// Anchor of the projection: the lat/lon of the world origin.
///
/// `anchor.x` is latitude in degrees north, `anchor.y` is longitude in
/// degrees west.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoReference {
    /// Latitude/longitude of world position `(0, 0, _)`.
    pub anchor: DVec2,
    /// Earth radius in meters.
    pub earth_radius_m: f64,
}

impl GeoReference {
    /// Create a reference at the given anchor with the default earth radius.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            anchor: DVec2::new(latitude, longitude),
            earth_radius_m: EARTH_RADIUS_M,
        }
    }

    /// Degrees of arc per world unit along either planar axis.
    pub fn degrees_per_unit(&self) -> f64 {
        180.0 / (PI * self.earth_radius_m)
    }

    /// Convert a world position to latitude (x) and longitude west (y).
    ///
    /// World +Y maps to north, world -X maps to west. Height is ignored.
    pub fn to_lat_lon(&self, world: Vec3) -> DVec2 {
        let planar = DVec2::new(f64::from(world.y), -f64::from(world.x));
        self.anchor + planar * self.degrees_per_unit()
    }
}

impl Default for GeoReference {
    fn default() -> Self {
        Self::new(34.0, 118.0)
    }
}

impl From<&GeoConfig> for GeoReference {
    fn from(config: &GeoConfig) -> Self {
        Self {
            anchor: DVec2::new(config.anchor_latitude, config.anchor_longitude),
            earth_radius_m: config.earth_radius_m,
        }
    }
}

/// Display wrapper for a projected `(latitude, longitude west)` pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon(pub DVec2);

impl LatLon {
    /// Latitude in degrees, positive north.
    pub fn latitude(&self) -> f64 {
        self.0.x
    }

    /// Longitude in degrees, positive west.
    pub fn longitude_west(&self) -> f64 {
        self.0.y
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.latitude() >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude_west() >= 0.0 { "W" } else { "E" };
        write!(
            f,
            "{:.6}\u{00B0}{}, {:.6}\u{00B0}{}",
            self.latitude().abs(),
            lat_dir,
            self.longitude_west().abs(),
            lon_dir,
        )
    }
}
