//! Raw 8-bit RGB image buffers.
//!
//! The compositor core works on these codec-free buffers; decoding and
//! encoding container formats happens at the binary boundary.

use thiserror::Error;

/// Number of color channels per pixel.
pub const RGB_CHANNELS: usize = 3;

/// Error returned when a pixel buffer disagrees with the declared shape.
#[derive(Debug, Error)]
#[error("pixel buffer of {actual} bytes does not match {width}x{height} RGB")]
pub struct ImageSizeError {
    pub width: usize,
    pub height: usize,
    pub actual: usize,
}

/// A read-only interleaved 8-bit RGB source image.
#[derive(Debug, Clone)]
pub struct SourceImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl SourceImage {
    /// Wrap an interleaved RGB buffer (`width * height * 3` bytes).
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageSizeError> {
        if data.len() != width * height * RGB_CHANNELS {
            return Err(ImageSizeError {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel value at integer pixel coordinates.
    ///
    /// # Panics
    /// Panics if `channel`, `row` or `col` is out of range.
    #[inline]
    pub fn sample8(&self, channel: usize, row: usize, col: usize) -> u8 {
        assert!(channel < RGB_CHANNELS && row < self.height && col < self.width);
        self.data[(row * self.width + col) * RGB_CHANNELS + channel]
    }
}

/// A freshly allocated interleaved 8-bit RGB output image.
///
/// Never aliases the source images it was composed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl OutputImage {
    /// Wrap an interleaved RGB buffer (`width * height * 3` bytes).
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, ImageSizeError> {
        if pixels.len() != width * height * RGB_CHANNELS {
            return Err(ImageSizeError {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel value at integer pixel coordinates.
    #[inline]
    pub fn sample8(&self, channel: usize, row: usize, col: usize) -> u8 {
        assert!(channel < RGB_CHANNELS && row < self.height && col < self.width);
        self.pixels[(row * self.width + col) * RGB_CHANNELS + channel]
    }

    /// Interleaved RGB bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image, handing the buffer to an encoder.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}
