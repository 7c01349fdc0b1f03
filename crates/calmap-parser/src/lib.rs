//! Calibration map loading.
//!
//! The calibration map records, for every panorama cell, the spherical
//! direction it represents and which hemisphere capture supplies its color.
//! Two persisted formats are supported and unified behind
//! [`CalibrationMap`]:
//!
//! - the binary `CMAP` format ([`binary`])
//! - a whitespace tabular text format ([`text`])
//!
//! Both carry the closed-grid convention explicitly instead of implying it
//! from the format.

pub mod binary;
pub mod error;
pub mod text;

pub use error::{MapError, Result};

use std::fs;
use std::path::Path;

use pano_common::CoordGrid;
use tracing::debug;

/// A loaded calibration map plus its edge convention.
#[derive(Debug, Clone)]
pub struct CalibrationMap {
    /// Angular grid, cells ordered `(lat, lon, selector)`.
    pub grid: CoordGrid,
    /// Whether the last row/column duplicate the first (closed grid).
    pub closed: bool,
}

impl CalibrationMap {
    /// Load a map from disk, sniffing the binary magic to pick the format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path)?;

        let map = if raw.starts_with(binary::MAGIC) {
            binary::parse(&raw)?
        } else {
            let content = std::str::from_utf8(&raw).map_err(|_| {
                MapError::InvalidHeader(
                    "map file is neither CMAP binary nor UTF-8 text".to_string(),
                )
            })?;
            text::parse(content)?
        };

        debug!(
            path = %path.display(),
            height = map.grid.height(),
            width = map.grid.width(),
            closed = map.closed,
            "calibration map loaded"
        );
        Ok(map)
    }
}
