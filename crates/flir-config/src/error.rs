//! Errors raised while loading or saving `config.ron`.

use std::path::PathBuf;

/// Configuration I/O and format errors. I/O and parse variants carry the
/// offending file so hosts can point the player at it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config directory or file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// A tunable is outside the range the camera can work with.
    #[error("invalid config value {field} = {value}")]
    Invalid { field: &'static str, value: f64 },

    /// The in-memory config could not be rendered as RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}
