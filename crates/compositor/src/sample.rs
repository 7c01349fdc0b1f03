//! Bilinear image sampling with a periodic column axis.

use pano_common::SourceImage;

use crate::config::{RowWrapPolicy, NEUTRAL_FILL};

/// Sample one channel of `img` at fractional pixel coordinates.
///
/// The column axis is periodic: `col` is reduced modulo the image width
/// and the right neighbor of the last column wraps to column 0, so the
/// seam interpolates smoothly. The row axis does not wrap; out-of-range
/// rows follow `row_policy`.
pub fn sample_bilinear(
    img: &SourceImage,
    channel: usize,
    row: f64,
    col: f64,
    row_policy: RowWrapPolicy,
) -> f32 {
    let width = img.width();
    let height = img.height();
    let max_row = (height - 1) as f64;

    let row = match row_policy {
        RowWrapPolicy::Clamp => row.clamp(0.0, max_row),
        RowWrapPolicy::Fill => {
            if !(0.0..=max_row).contains(&row) {
                return NEUTRAL_FILL;
            }
            row
        }
    };

    let col = col.rem_euclid(width as f64);
    let c0 = (col.floor() as usize).min(width - 1);
    let c1 = (c0 + 1) % width;
    let dc = (col - c0 as f64) as f32;

    let r0 = row.floor() as usize;
    let r1 = (r0 + 1).min(height - 1);
    let dr = (row - r0 as f64) as f32;

    let v00 = img.sample8(channel, r0, c0) as f32;
    let v01 = img.sample8(channel, r0, c1) as f32;
    let v10 = img.sample8(channel, r1, c0) as f32;
    let v11 = img.sample8(channel, r1, c1) as f32;

    let top = v00 * (1.0 - dc) + v01 * dc;
    let bottom = v10 * (1.0 - dc) + v11 * dc;
    top * (1.0 - dr) + bottom * dr
}
