//! Configuration system for the FLIR camera plugin.
//!
//! Settings live in `config.ron` under the platform config directory. Every
//! section is `#[serde(default)]`, so older files keep loading as fields are
//! added. Command-line flags override individual values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, GeoConfig, TrackingConfig, ZoomConfig,
    default_config_dir,
};
pub use error::ConfigError;
