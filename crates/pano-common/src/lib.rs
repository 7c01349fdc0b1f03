//! Common types shared across the sphere-compositor workspace.

pub mod grid;
pub mod image;

pub use grid::{CoordGrid, GridShapeError, CHANNELS, CH_LAT, CH_LON, CH_SELECTOR};
pub use image::{ImageSizeError, OutputImage, SourceImage, RGB_CHANNELS};
