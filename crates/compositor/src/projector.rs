//! Angular-to-pixel projection.

use std::f64::consts::PI;

use pano_common::CoordGrid;

use crate::error::{ComposeError, Result};

/// Project an angular grid into a source image's pixel-coordinate space.
///
/// Each cell `(lat, lon, selector)` becomes `(row, col, selector)` with
/// `row = lat * height / π` and `col = lon * width / 2π`. Elementwise and
/// shape-preserving; projected coordinates at the grid boundary may fall
/// just outside the image and are handled by the sampler.
pub fn project(map: &CoordGrid, image_width: usize, image_height: usize) -> Result<CoordGrid> {
    if image_width == 0 {
        return Err(ComposeError::InvalidDimension {
            name: "image_width",
            value: 0,
            reason: "source image must be at least one pixel wide",
        });
    }
    if image_height == 0 {
        return Err(ComposeError::InvalidDimension {
            name: "image_height",
            value: 0,
            reason: "source image must be at least one pixel tall",
        });
    }

    let row_scale = image_height as f64 / PI;
    let col_scale = image_width as f64 / (2.0 * PI);
    Ok(map.map_cells(|[lat, lon, selector]| [lat * row_scale, lon * col_scale, selector]))
}
