//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level plugin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Camera mount and display settings.
    pub camera: CameraConfig,
    /// Zoom input and easing settings.
    pub zoom: ZoomConfig,
    /// Ground tracking settings.
    pub tracking: TrackingConfig,
    /// Geo projection reference.
    pub geo: GeoConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Camera mount and display configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Mount offset relative to the vehicle origin (x, y, z).
    pub mount_offset: [f32; 3],
    /// Field of view in degrees when the camera is first attached.
    pub initial_fov_deg: f32,
    /// Rotation per unit of look input is `fov / look_divisor` degrees.
    pub look_divisor: f32,
    /// Host timecycle modifier applied while viewing through the camera.
    pub timecycle_modifier: String,
    /// Strength of the timecycle modifier (0.0 - 1.0).
    pub timecycle_strength: f32,
}

/// Zoom configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomConfig {
    /// Degrees of FOV change per scroll notch.
    pub step_deg: f32,
    /// Fraction of the remaining FOV difference closed per easing step.
    pub easing_factor: f32,
    /// Remaining difference (degrees) below which the FOV snaps to target.
    pub snap_threshold_deg: f32,
    /// Scale the easing factor by elapsed time instead of applying it per frame.
    pub time_scaled: bool,
    /// Frame rate the easing factor is tuned for when `time_scaled` is set.
    pub reference_hz: f32,
}

/// Ground tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackingConfig {
    /// Minimum interval between ground samples in milliseconds.
    pub poll_interval_ms: u64,
    /// Length of the tracking ray in world units.
    pub ray_length: f32,
}

/// Geo projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeoConfig {
    /// Latitude (degrees north) of the world origin.
    pub anchor_latitude: f64,
    /// Longitude (degrees west) of the world origin.
    pub anchor_longitude: f64,
    /// Earth radius in meters used for the planar approximation.
    pub earth_radius_m: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every accepted ground sample at debug level.
    pub trace_samples: bool,
}

// --- Default implementations ---

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mount_offset: [0.0, 2.9, -0.9],
            initial_fov_deg: 50.0,
            look_divisor: 8.0,
            timecycle_modifier: "heliGunCam".to_string(),
            timecycle_strength: 0.9,
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            step_deg: 3.0,
            easing_factor: 0.05,
            snap_threshold_deg: 0.01,
            time_scaled: false,
            reference_hz: 60.0,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            ray_length: 10_000.0,
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            anchor_latitude: 34.0,
            anchor_longitude: 118.0,
            earth_radius_m: 6.3781e6,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trace_samples: true,
        }
    }
}

/// Default directory holding `config.ron`, or `None` if the platform has no
/// config directory.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flircam"))
}

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure(
    field: &'static str,
    value: impl Into<f64>,
    valid: impl FnOnce(f64) -> bool,
) -> Result<(), ConfigError> {
    let value = value.into();
    if value.is_finite() && valid(value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, value })
    }
}

impl Config {
    /// Check the tunables the camera divides by or eases with.
    ///
    /// Easing factors must lie in (0, 1]. Divisors, thresholds, rates and
    /// lengths must be positive. Everything must be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure("camera.initial_fov_deg", self.camera.initial_fov_deg, |_| true)?;
        ensure("camera.look_divisor", self.camera.look_divisor, |v| v > 0.0)?;
        ensure("zoom.step_deg", self.zoom.step_deg, |v| v > 0.0)?;
        ensure("zoom.easing_factor", self.zoom.easing_factor, |v| v > 0.0 && v <= 1.0)?;
        ensure("zoom.snap_threshold_deg", self.zoom.snap_threshold_deg, |v| v > 0.0)?;
        ensure("zoom.reference_hz", self.zoom.reference_hz, |v| v > 0.0)?;
        ensure("tracking.ray_length", self.tracking.ray_length, |v| v > 0.0)?;
        ensure("geo.anchor_latitude", self.geo.anchor_latitude, |_| true)?;
        ensure("geo.anchor_longitude", self.geo.anchor_longitude, |_| true)?;
        ensure("geo.earth_radius_m", self.geo.earth_radius_m, |v| v > 0.0)
    }

    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet. A file with out-of-range values is
    /// rejected with [`ConfigError::Invalid`].
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default FLIR config to {}", path.display());
            return Ok(config);
        }
        let config = read_config(&path)?;
        config.validate()?;
        log::info!("Loaded FLIR config from {}", path.display());
        Ok(config)
    }

    /// Write the config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        let write_error = |source: std::io::Error| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&path, serialized).map_err(write_error)
    }

    /// Re-read the file. `Some` only when it differs from `self`, so hosts
    /// can poll this cheaply and rebuild session settings on change. An
    /// edit that fails [`validate`](Self::validate) is an error and the
    /// running config stays in effect.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE_NAME))?;
        fresh.validate()?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("FLIR config changed on disk");
        Ok(Some(fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("poll_interval_ms: 250"));
        assert!(ron_str.contains("timecycle_modifier: \"heliGunCam\""));
    }

    #[test]
    fn test_default_geo_reference_matches_world_anchor() {
        let geo = GeoConfig::default();
        assert_eq!(geo.anchor_latitude, 34.0);
        assert_eq!(geo.anchor_longitude, 118.0);
        assert_eq!(geo.earth_radius_m, 6_378_100.0);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(camera: (), tracking: (poll_interval_ms: 500))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.zoom, ZoomConfig::default());
        assert_eq!(config.tracking.poll_interval_ms, 500);
        assert_eq!(config.tracking.ray_length, 10_000.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.zoom.time_scaled = true;
        config.geo.anchor_latitude = 33.5;
        config.camera.mount_offset = [0.0, 1.5, -0.5];

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.tracking.poll_interval_ms = 100;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().tracking.poll_interval_ms, 100);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    fn invalid_field(config: &Config) -> Option<&'static str> {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_easing_factor_must_be_in_unit_interval() {
        let mut config = Config::default();
        config.zoom.easing_factor = 1.8;
        assert_eq!(invalid_field(&config), Some("zoom.easing_factor"));
        config.zoom.easing_factor = 0.0;
        assert_eq!(invalid_field(&config), Some("zoom.easing_factor"));
        config.zoom.easing_factor = 1.0;
        assert_eq!(invalid_field(&config), None);
    }

    #[test]
    fn test_reference_hz_must_be_positive_and_finite() {
        let mut config = Config::default();
        config.zoom.time_scaled = true;
        config.zoom.reference_hz = 0.0;
        assert_eq!(invalid_field(&config), Some("zoom.reference_hz"));
        config.zoom.reference_hz = f32::NAN;
        assert_eq!(invalid_field(&config), Some("zoom.reference_hz"));
        config.zoom.reference_hz = f32::INFINITY;
        assert_eq!(invalid_field(&config), Some("zoom.reference_hz"));
    }

    #[test]
    fn test_divisors_and_lengths_must_be_positive() {
        let mut config = Config::default();
        config.camera.look_divisor = 0.0;
        assert_eq!(invalid_field(&config), Some("camera.look_divisor"));

        let mut config = Config::default();
        config.zoom.snap_threshold_deg = -0.01;
        assert_eq!(invalid_field(&config), Some("zoom.snap_threshold_deg"));

        let mut config = Config::default();
        config.tracking.ray_length = 0.0;
        assert_eq!(invalid_field(&config), Some("tracking.ray_length"));

        let mut config = Config::default();
        config.zoom.step_deg = f32::NAN;
        assert_eq!(invalid_field(&config), Some("zoom.step_deg"));
    }

    #[test]
    fn test_non_finite_anchor_rejected() {
        let mut config = Config::default();
        config.geo.anchor_latitude = f64::NAN;
        assert_eq!(invalid_field(&config), Some("geo.anchor_latitude"));
    }

    #[test]
    fn test_load_rejects_out_of_range_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "(zoom: (easing_factor: 1.8))",
        )
        .unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "zoom.easing_factor",
                ..
            })
        ));
    }

    #[test]
    fn test_reload_rejects_out_of_range_edit() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut edited = config.clone();
        edited.camera.look_divisor = 0.0;
        edited.save(dir.path()).unwrap();

        assert!(matches!(
            config.reload(dir.path()),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
