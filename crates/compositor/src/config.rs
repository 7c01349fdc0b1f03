//! Configuration for the compose pipeline.

use serde::{Deserialize, Serialize};

/// Neutral fill value substituted by [`RowWrapPolicy::Fill`].
pub const NEUTRAL_FILL: f32 = 127.0;

/// Fallback for rows sampled outside a source image.
///
/// The column axis is always periodic; the row axis is not, so projected
/// rows can land just past the image edge at the poles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RowWrapPolicy {
    /// Clamp out-of-range rows to the nearest edge row.
    #[default]
    Clamp,
    /// Substitute the neutral fill value for out-of-range rows.
    Fill,
}

/// Options for one compose run, passed explicitly into every stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeOptions {
    /// Requested output width. Upsampling only happens when the height is
    /// also set; otherwise the native map resolution is used.
    pub output_width: Option<usize>,
    /// Requested output height.
    pub output_height: Option<usize>,
    /// Whether the map duplicates its first row/column as a closing edge.
    pub closed_grid: bool,
    /// Out-of-range row fallback.
    pub row_wrap: RowWrapPolicy,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            output_width: None,
            output_height: None,
            closed_grid: true,
            row_wrap: RowWrapPolicy::default(),
        }
    }
}
