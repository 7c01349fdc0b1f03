//! Error types for calibration map loading.

use thiserror::Error;

/// Result type alias using MapError.
pub type Result<T> = std::result::Result<T, MapError>;

/// Errors that can occur while loading a calibration map.
///
/// All of them are fatal to a compose run; there is no partial map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a calibration map: bad magic bytes")]
    InvalidMagic,

    #[error("unsupported map version: {0}")]
    UnsupportedVersion(u32),

    #[error("map data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("map declares a zero dimension ({height}x{width})")]
    ZeroDimension { height: usize, width: usize },

    #[error("invalid map header: {0}")]
    InvalidHeader(String),

    #[error("malformed map record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("map has {actual} cells, header declares {expected}")]
    CellCountMismatch { expected: usize, actual: usize },
}
