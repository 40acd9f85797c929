// error.rs
// Crate-wide error type. Construction-time problems (bad geometry dimensions,
// unprepared materials, malformed run configuration) are fatal and surfaced
// immediately; the cascade engine itself never produces errors.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction parameter (non-positive dimension, empty
    /// composition, material/boundary mismatch).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Malformed run configuration file.
    #[error("run configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Propagated I/O errors from config loading and output writing.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
