//! Dual-source blending and channel assembly.

use pano_common::{CoordGrid, OutputImage, SourceImage, RGB_CHANNELS};

use crate::config::ComposeOptions;
use crate::error::{ComposeError, Result};
use crate::sample::sample_bilinear;

/// Round a selector value to the hard {0, 1} mask.
///
/// Ties round to even, so a 0.5 selector picks the lower source.
#[inline]
fn selector_mask(selector: f64) -> f32 {
    selector.round_ties_even().clamp(0.0, 1.0) as f32
}

/// Blend the two source images through their pixel maps.
///
/// Both maps must share the output shape. Per channel, the upper image is
/// sampled at the upper map's coordinates and the lower image at the
/// column-mirrored lower map — the lower hemisphere is captured with
/// reversed lateral orientation. The upper map's selector, rounded to a
/// hard mask, picks the contributing source per pixel; there is no
/// feathering across the seam.
pub fn blend(
    upper: &SourceImage,
    lower: &SourceImage,
    upper_map: &CoordGrid,
    lower_map: &CoordGrid,
    options: &ComposeOptions,
) -> Result<OutputImage> {
    if upper_map.dims() != lower_map.dims() {
        let (expected_h, expected_w) = upper_map.dims();
        let (actual_h, actual_w) = lower_map.dims();
        return Err(ComposeError::ShapeMismatch {
            context: "pixel maps",
            expected_h,
            expected_w,
            actual_h,
            actual_w,
        });
    }

    let (height, width) = upper_map.dims();
    let mut planes: Vec<Vec<f32>> = Vec::with_capacity(RGB_CHANNELS);

    for channel in 0..RGB_CHANNELS {
        let mut plane = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                let [u_row, u_col, selector] = upper_map.get(row, col);
                let [l_row, l_col, _] = lower_map.get(row, width - 1 - col);

                let u = sample_bilinear(upper, channel, u_row, u_col, options.row_wrap);
                let l = sample_bilinear(lower, channel, l_row, l_col, options.row_wrap);

                let mask = selector_mask(selector);
                plane.push(mask * u + (1.0 - mask) * l);
            }
        }
        planes.push(plane);
    }

    Ok(stack_channels(&planes, width, height))
}

/// Stack three blended channel planes into one interleaved RGB image.
///
/// Values are rounded and clamped to `[0, 255]` here, the only place the
/// pipeline quantizes.
pub fn stack_channels(planes: &[Vec<f32>], width: usize, height: usize) -> OutputImage {
    assert_eq!(planes.len(), RGB_CHANNELS, "expected one plane per channel");
    let cell_count = width * height;
    for plane in planes {
        assert_eq!(
            plane.len(),
            cell_count,
            "channel plane length disagrees with {}x{} output",
            height,
            width
        );
    }

    let mut pixels = Vec::with_capacity(cell_count * RGB_CHANNELS);
    for idx in 0..cell_count {
        for plane in planes {
            pixels.push(plane[idx].round().clamp(0.0, 255.0) as u8);
        }
    }

    OutputImage::from_raw(width, height, pixels).expect("plane lengths validated above")
}
