//! Error types for the compositor core.

use thiserror::Error;

/// Result type alias using ComposeError.
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Errors that can occur while composing a panorama.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A requested or implied dimension cannot drive the pipeline.
    #[error("invalid dimension {name}={value}: {reason}")]
    InvalidDimension {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// Two grids that must agree in shape do not.
    #[error("shape mismatch in {context}: {expected_h}x{expected_w} vs {actual_h}x{actual_w}")]
    ShapeMismatch {
        context: &'static str,
        expected_h: usize,
        expected_w: usize,
        actual_h: usize,
        actual_w: usize,
    },
}
