//! Calibration grid upsampling.
//!
//! Separable bilinear resampling of a coordinate grid to an arbitrary
//! target resolution. Edges clamp; wraparound is not applied here because a
//! closed grid already encodes its periodicity in the duplicated edge.

use pano_common::{CoordGrid, CHANNELS};

use crate::error::{ComposeError, Result};

/// Resample `grid` to `target_height x target_width`.
///
/// Output cell `(i, j)` samples the source at fractional coordinates
/// `i * (H-1)/(target_height-1)`, `j * (W-1)/(target_width-1)`, so the
/// first and last samples along each axis stay pinned to the source
/// corners. Upsampling to the native resolution reproduces the grid
/// exactly. All three channels, the selector included, interpolate
/// identically.
pub fn upsample(grid: &CoordGrid, target_height: usize, target_width: usize) -> Result<CoordGrid> {
    for (name, value) in [
        ("output_height", target_height),
        ("output_width", target_width),
    ] {
        if value < 2 {
            return Err(ComposeError::InvalidDimension {
                name,
                value,
                reason: "interpolation needs at least 2 samples per axis",
            });
        }
    }

    let (src_h, src_w) = grid.dims();
    let row_scale = (src_h - 1) as f64 / (target_height - 1) as f64;
    let col_scale = (src_w - 1) as f64 / (target_width - 1) as f64;

    Ok(CoordGrid::from_fn(target_height, target_width, |i, j| {
        bilinear_cell(grid, i as f64 * row_scale, j as f64 * col_scale)
    }))
}

/// Bilinear evaluation of a grid cell at fractional coordinates.
///
/// Coordinates are within `[0, H-1] x [0, W-1]` by construction; the
/// right/bottom neighbors clamp at the last sample.
fn bilinear_cell(grid: &CoordGrid, row: f64, col: f64) -> [f64; CHANNELS] {
    let (height, width) = grid.dims();

    let r0 = row.floor() as usize;
    let c0 = col.floor() as usize;
    let r1 = (r0 + 1).min(height - 1);
    let c1 = (c0 + 1).min(width - 1);

    let dr = row - r0 as f64;
    let dc = col - c0 as f64;

    let v00 = grid.get(r0, c0);
    let v01 = grid.get(r0, c1);
    let v10 = grid.get(r1, c0);
    let v11 = grid.get(r1, c1);

    let mut cell = [0.0; CHANNELS];
    for ch in 0..CHANNELS {
        let top = v00[ch] * (1.0 - dc) + v01[ch] * dc;
        let bottom = v10[ch] * (1.0 - dc) + v11[ch] * dc;
        cell[ch] = top * (1.0 - dr) + bottom * dr;
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use pano_common::{CH_LAT, CH_LON, CH_SELECTOR};

    fn ramp(height: usize, width: usize) -> CoordGrid {
        CoordGrid::from_fn(height, width, |r, c| {
            [r as f64, c as f64, (r + c) as f64 * 0.1]
        })
    }

    #[test]
    fn test_shape_invariant() {
        let grid = ramp(3, 5);
        let up = upsample(&grid, 9, 17).unwrap();
        assert_eq!(up.dims(), (9, 17));
    }

    #[test]
    fn test_identity_at_native_resolution() {
        let grid = ramp(4, 6);
        let same = upsample(&grid, 4, 6).unwrap();
        assert_eq!(same, grid);
    }

    #[test]
    fn test_corners_pinned() {
        let grid = ramp(3, 3);
        let up = upsample(&grid, 7, 7).unwrap();
        assert_eq!(up.get(0, 0), grid.get(0, 0));
        assert_eq!(up.get(0, 6), grid.get(0, 2));
        assert_eq!(up.get(6, 0), grid.get(2, 0));
        assert_eq!(up.get(6, 6), grid.get(2, 2));
    }

    #[test]
    fn test_midpoint_is_linear() {
        // 2x2 ramp upsampled to 3x3: the center is the mean of all corners.
        let grid = ramp(2, 2);
        let up = upsample(&grid, 3, 3).unwrap();
        let center = up.get(1, 1);
        assert!((center[CH_LAT] - 0.5).abs() < 1e-12);
        assert!((center[CH_LON] - 0.5).abs() < 1e-12);
        assert!((center[CH_SELECTOR] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_selector_interpolates_like_other_channels() {
        let grid = CoordGrid::from_fn(1, 2, |_, c| [0.0, 0.0, c as f64]);
        let up = upsample(&grid, 2, 3).unwrap();
        assert!((up.get(0, 1)[CH_SELECTOR] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_degenerate_targets() {
        let grid = ramp(3, 3);
        for (h, w) in [(0, 4), (1, 4), (4, 0), (4, 1)] {
            assert!(matches!(
                upsample(&grid, h, w),
                Err(ComposeError::InvalidDimension { .. })
            ));
        }
    }
}
