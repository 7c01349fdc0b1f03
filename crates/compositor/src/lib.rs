//! Spherical panorama composition.
//!
//! Fuses two hemisphere captures into one equirectangular-style panorama
//! using a precomputed angular calibration map:
//!
//! - Angular-to-pixel projection against each source image
//! - Optional bilinear upsampling of the calibration grid
//! - Masked dual-source resampling with a periodic column axis
//! - Channel stacking into an 8-bit RGB composite
//!
//! The pipeline is synchronous and single-pass; every stage consumes an
//! immutable input and produces a new owned grid or image.

pub mod blend;
pub mod config;
pub mod error;
pub mod projector;
pub mod sample;
pub mod upsample;

pub use config::{ComposeOptions, RowWrapPolicy, NEUTRAL_FILL};
pub use error::{ComposeError, Result};

use pano_common::{CoordGrid, OutputImage, SourceImage};
use tracing::debug;

/// Compose the panorama described by `map` from two hemisphere captures.
///
/// `map` holds `(lat, lon, selector)` cells; `upper` and `lower` are the
/// upper- and lower-sphere source images. The output shape is the working
/// grid's shape: the requested output dimensions when upsampling, otherwise
/// the native map resolution (minus the closing edge for closed grids).
pub fn compose(
    map: &CoordGrid,
    upper: &SourceImage,
    lower: &SourceImage,
    options: &ComposeOptions,
) -> Result<OutputImage> {
    let working = prepare_grid(map, options)?;
    debug!(
        height = working.height(),
        width = working.width(),
        closed = options.closed_grid,
        "calibration grid prepared"
    );

    let upper_map = projector::project(&working, upper.width(), upper.height())?;
    let lower_map = projector::project(&working, lower.width(), lower.height())?;
    debug!("angular grid projected against both sources");

    blend::blend(upper, lower, &upper_map, &lower_map, options)
}

/// Upsample and/or strip the closing edge per the configured convention.
///
/// Upsampling only happens when both output dimensions are set. A closed
/// grid is resampled one sample past the target along each axis and the
/// duplicated edge discarded, so the result stays consistent with
/// wraparound sampling downstream.
fn prepare_grid(map: &CoordGrid, options: &ComposeOptions) -> Result<CoordGrid> {
    for (name, value) in [
        ("output_width", options.output_width),
        ("output_height", options.output_height),
    ] {
        if let Some(value) = value {
            if value < 2 {
                return Err(ComposeError::InvalidDimension {
                    name,
                    value,
                    reason: "interpolated output needs at least 2 samples per axis",
                });
            }
        }
    }

    if options.closed_grid {
        let (map_h, map_w) = map.dims();
        if map_h < 2 || map_w < 2 {
            return Err(ComposeError::InvalidDimension {
                name: "calibration_map",
                value: map_h.min(map_w),
                reason: "a closed grid carries a duplicated edge and needs at least 2 samples per axis",
            });
        }
    }

    match (options.output_width, options.output_height) {
        (Some(width), Some(height)) => {
            if options.closed_grid {
                Ok(upsample::upsample(map, height + 1, width + 1)?.trim_closing_edge())
            } else {
                upsample::upsample(map, height, width)
            }
        }
        _ => {
            if options.closed_grid {
                Ok(map.trim_closing_edge())
            } else {
                Ok(map.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_map(height: usize, width: usize) -> CoordGrid {
        CoordGrid::from_fn(height, width, |_, _| [1.0, 1.0, 1.0])
    }

    #[test]
    fn test_prepare_grid_native_open() {
        let map = flat_map(3, 4);
        let opts = ComposeOptions {
            closed_grid: false,
            ..ComposeOptions::default()
        };
        assert_eq!(prepare_grid(&map, &opts).unwrap().dims(), (3, 4));
    }

    #[test]
    fn test_prepare_grid_native_closed_trims() {
        let map = flat_map(3, 4);
        let opts = ComposeOptions::default();
        assert_eq!(prepare_grid(&map, &opts).unwrap().dims(), (2, 3));
    }

    #[test]
    fn test_prepare_grid_upsample_closed() {
        let map = flat_map(3, 3);
        let opts = ComposeOptions {
            output_width: Some(8),
            output_height: Some(4),
            ..ComposeOptions::default()
        };
        assert_eq!(prepare_grid(&map, &opts).unwrap().dims(), (4, 8));
    }

    #[test]
    fn test_prepare_grid_single_dimension_means_native() {
        let map = flat_map(3, 4);
        let opts = ComposeOptions {
            output_width: Some(16),
            closed_grid: false,
            ..ComposeOptions::default()
        };
        assert_eq!(prepare_grid(&map, &opts).unwrap().dims(), (3, 4));
    }

    #[test]
    fn test_prepare_grid_rejects_degenerate_request() {
        let map = flat_map(3, 3);
        for (w, h) in [(Some(1), Some(8)), (Some(8), Some(0)), (Some(1), None)] {
            let opts = ComposeOptions {
                output_width: w,
                output_height: h,
                ..ComposeOptions::default()
            };
            assert!(matches!(
                prepare_grid(&map, &opts),
                Err(ComposeError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn test_prepare_grid_rejects_degenerate_closed_map() {
        let map = flat_map(1, 4);
        assert!(matches!(
            prepare_grid(&map, &ComposeOptions::default()),
            Err(ComposeError::InvalidDimension { .. })
        ));
    }
}
