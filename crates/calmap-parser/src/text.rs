//! Tabular text calibration map format.
//!
//! The first non-comment line is a header: `height width [closed|open]`
//! (the edge convention defaults to `closed`). Every following line is one
//! `lat lon selector` triple in row-major cell order. `#` starts a comment;
//! blank lines are ignored.

use pano_common::{CoordGrid, CHANNELS};

use crate::error::{MapError, Result};
use crate::CalibrationMap;

/// Parse a tabular text map.
pub fn parse(input: &str) -> Result<CalibrationMap> {
    let mut lines = input.lines().enumerate().filter_map(|(idx, line)| {
        let stripped = line.split('#').next().unwrap_or("").trim();
        if stripped.is_empty() {
            None
        } else {
            Some((idx + 1, stripped))
        }
    });

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| MapError::InvalidHeader("empty map file".to_string()))?;
    let (height, width, closed) = parse_header(header_line, header)?;

    let cell_count = height * width;
    let mut cells = Vec::with_capacity(cell_count);
    for (line_no, record) in lines {
        if cells.len() == cell_count {
            return Err(MapError::CellCountMismatch {
                expected: cell_count,
                actual: cell_count + 1,
            });
        }
        cells.push(parse_record(line_no, record)?);
    }
    if cells.len() != cell_count {
        return Err(MapError::CellCountMismatch {
            expected: cell_count,
            actual: cells.len(),
        });
    }

    let grid = CoordGrid::new(height, width, cells).expect("cell count checked above");
    Ok(CalibrationMap { grid, closed })
}

fn parse_header(line: usize, header: &str) -> Result<(usize, usize, bool)> {
    let mut fields = header.split_whitespace();
    let height = parse_dim(line, fields.next(), "height")?;
    let width = parse_dim(line, fields.next(), "width")?;
    let closed = match fields.next() {
        None | Some("closed") => true,
        Some("open") => false,
        Some(other) => {
            return Err(MapError::InvalidHeader(format!(
                "unknown edge convention '{}' (line {})",
                other, line
            )))
        }
    };
    if let Some(extra) = fields.next() {
        return Err(MapError::InvalidHeader(format!(
            "unexpected header field '{}' (line {})",
            extra, line
        )));
    }
    if height == 0 || width == 0 {
        return Err(MapError::ZeroDimension { height, width });
    }
    Ok((height, width, closed))
}

fn parse_dim(line: usize, field: Option<&str>, name: &str) -> Result<usize> {
    let token = field
        .ok_or_else(|| MapError::InvalidHeader(format!("missing {} (line {})", name, line)))?;
    token
        .parse()
        .map_err(|_| MapError::InvalidHeader(format!("bad {} '{}' (line {})", name, token, line)))
}

fn parse_record(line: usize, record: &str) -> Result<[f64; CHANNELS]> {
    let mut cell = [0.0; CHANNELS];
    let mut fields = record.split_whitespace();
    for (slot, name) in cell.iter_mut().zip(["lat", "lon", "selector"]) {
        let token = fields.next().ok_or_else(|| MapError::MalformedRecord {
            line,
            message: format!("missing {}", name),
        })?;
        *slot = token.parse().map_err(|_| MapError::MalformedRecord {
            line,
            message: format!("bad {} '{}'", name, token),
        })?;
    }
    if let Some(extra) = fields.next() {
        return Err(MapError::MalformedRecord {
            line,
            message: format!("unexpected field '{}'", extra),
        });
    }
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_comments_and_blanks() {
        let input = "\
# calibration map
2 2 open

0.0 0.0 1.0
0.0 3.14 1.0   # equator
1.57 0.0 0.5
1.57 3.14 0.0
";
        let map = parse(input).unwrap();
        assert!(!map.closed);
        assert_eq!(map.grid.dims(), (2, 2));
        assert_eq!(map.grid.get(0, 1)[1], 3.14);
        assert_eq!(map.grid.get(1, 0)[2], 0.5);
    }

    #[test]
    fn test_header_defaults_to_closed() {
        let map = parse("1 1\n0 0 1\n").unwrap();
        assert!(map.closed);
    }

    #[test]
    fn test_bad_edge_convention() {
        assert!(matches!(
            parse("1 1 wrapped\n0 0 1\n"),
            Err(MapError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_malformed_record_carries_line_number() {
        let err = parse("1 2\n0 0 1\n0 nope 1\n").unwrap_err();
        match err {
            MapError::MalformedRecord { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("lon"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_cell_count_mismatch() {
        assert!(matches!(
            parse("2 2\n0 0 1\n"),
            Err(MapError::CellCountMismatch {
                expected: 4,
                actual: 1
            })
        ));
        assert!(matches!(
            parse("1 1\n0 0 1\n0 0 1\n"),
            Err(MapError::CellCountMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_dimension_header() {
        assert!(matches!(
            parse("0 3\n"),
            Err(MapError::ZeroDimension { .. })
        ));
    }
}
