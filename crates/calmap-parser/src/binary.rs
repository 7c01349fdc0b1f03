//! Binary `CMAP` calibration map format.
//!
//! Little-endian layout:
//!
//! ```text
//! magic "CMAP" | version u32 | height u32 | width u32 | flags u8
//! height * width cells of (lat f64, lon f64, selector f64)
//! ```
//!
//! Flag bit 0 marks a closed grid (duplicated last row/column).

use bytes::Buf;
use pano_common::{CoordGrid, CHANNELS};

use crate::error::{MapError, Result};
use crate::CalibrationMap;

/// File magic for the binary format.
pub const MAGIC: &[u8; 4] = b"CMAP";

const VERSION: u32 = 1;
const FLAG_CLOSED: u8 = 0x01;
const HEADER_LEN: usize = 4 + 4 + 4 + 4 + 1;
const CELL_LEN: usize = CHANNELS * 8;

/// Parse a CMAP byte buffer.
pub fn parse(raw: &[u8]) -> Result<CalibrationMap> {
    if raw.len() < HEADER_LEN {
        return Err(MapError::Truncated {
            expected: HEADER_LEN,
            actual: raw.len(),
        });
    }

    let mut buf = raw;
    let mut magic = [0u8; 4];
    buf.copy_to_slice(&mut magic);
    if &magic != MAGIC {
        return Err(MapError::InvalidMagic);
    }

    let version = buf.get_u32_le();
    if version != VERSION {
        return Err(MapError::UnsupportedVersion(version));
    }

    let height = buf.get_u32_le() as usize;
    let width = buf.get_u32_le() as usize;
    let flags = buf.get_u8();
    if height == 0 || width == 0 {
        return Err(MapError::ZeroDimension { height, width });
    }

    let cell_count = height * width;
    if buf.remaining() != cell_count * CELL_LEN {
        return Err(MapError::Truncated {
            expected: HEADER_LEN + cell_count * CELL_LEN,
            actual: raw.len(),
        });
    }

    let mut cells = Vec::with_capacity(cell_count);
    for _ in 0..cell_count {
        cells.push([buf.get_f64_le(), buf.get_f64_le(), buf.get_f64_le()]);
    }

    let grid = CoordGrid::new(height, width, cells).expect("cell count checked against header");
    Ok(CalibrationMap {
        grid,
        closed: flags & FLAG_CLOSED != 0,
    })
}

/// Serialize a map to the CMAP byte layout.
pub fn write(map: &CalibrationMap) -> Vec<u8> {
    let (height, width) = map.grid.dims();
    let mut out = Vec::with_capacity(HEADER_LEN + height * width * CELL_LEN);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&(height as u32).to_le_bytes());
    out.extend_from_slice(&(width as u32).to_le_bytes());
    out.push(if map.closed { FLAG_CLOSED } else { 0 });
    for cell in map.grid.cells() {
        for value in cell {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map(closed: bool) -> CalibrationMap {
        CalibrationMap {
            grid: CoordGrid::from_fn(2, 3, |r, c| {
                [r as f64 * 0.5, c as f64 * 1.25, (r + c) as f64 * 0.1]
            }),
            closed,
        }
    }

    #[test]
    fn test_round_trip() {
        for closed in [true, false] {
            let map = sample_map(closed);
            let parsed = parse(&write(&map)).unwrap();
            assert_eq!(parsed.grid, map.grid);
            assert_eq!(parsed.closed, closed);
        }
    }

    #[test]
    fn test_bad_magic() {
        let mut raw = write(&sample_map(true));
        raw[0] = b'X';
        assert!(matches!(parse(&raw), Err(MapError::InvalidMagic)));
    }

    #[test]
    fn test_unsupported_version() {
        let mut raw = write(&sample_map(true));
        raw[4..8].copy_from_slice(&9u32.to_le_bytes());
        assert!(matches!(parse(&raw), Err(MapError::UnsupportedVersion(9))));
    }

    #[test]
    fn test_truncated_payload() {
        let raw = write(&sample_map(true));
        assert!(matches!(
            parse(&raw[..raw.len() - 5]),
            Err(MapError::Truncated { .. })
        ));
        assert!(matches!(
            parse(&raw[..HEADER_LEN - 1]),
            Err(MapError::Truncated { .. })
        ));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let mut raw = write(&sample_map(false));
        raw.push(0);
        assert!(matches!(parse(&raw), Err(MapError::Truncated { .. })));
    }

    #[test]
    fn test_zero_dimension() {
        let mut raw = write(&sample_map(true));
        raw[12..16].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(
            parse(&raw),
            Err(MapError::ZeroDimension { width: 0, .. })
        ));
    }
}
