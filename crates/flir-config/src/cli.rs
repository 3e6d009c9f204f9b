//! Command-line argument parsing for the FLIR tools.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Shared command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "flircam", about = "Vehicle FLIR camera")]
pub struct CliArgs {
    /// Ground sampling interval in milliseconds.
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Anchor latitude in degrees north.
    #[arg(long)]
    pub anchor_lat: Option<f64>,

    /// Anchor longitude in degrees west.
    #[arg(long)]
    pub anchor_lon: Option<f64>,

    /// Normalize zoom easing against elapsed time.
    #[arg(long)]
    pub time_scaled_zoom: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ms) = args.poll_interval_ms {
            self.tracking.poll_interval_ms = ms;
        }
        if let Some(lat) = args.anchor_lat {
            self.geo.anchor_latitude = lat;
        }
        if let Some(lon) = args.anchor_lon {
            self.geo.anchor_longitude = lon;
        }
        if let Some(scaled) = args.time_scaled_zoom {
            self.zoom.time_scaled = scaled;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            poll_interval_ms: Some(500),
            anchor_lat: Some(40.0),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.tracking.poll_interval_ms, 500);
        assert_eq!(config.geo.anchor_latitude, 40.0);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.geo.anchor_longitude, 118.0);
        assert!(!config.zoom.time_scaled);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "flircam",
            "--poll-interval-ms",
            "300",
            "--time-scaled-zoom",
            "true",
        ]);
        assert_eq!(args.poll_interval_ms, Some(300));
        assert_eq!(args.time_scaled_zoom, Some(true));
        assert!(args.config.is_none());
    }
}
