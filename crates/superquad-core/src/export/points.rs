//! Point list export
//!
//! One `x y z` line per grid point, row-major, no header.

use super::{ExportFormat, ExportSummary, PRECISION};
use crate::grid::PointGrid;
use crate::{Error, Result};
use glam::DVec3;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write the grid's points to any writer, returning the number of lines
pub fn write_points_to<W: Write>(writer: &mut W, grid: &PointGrid) -> Result<usize> {
    for p in grid.points() {
        writeln!(
            writer,
            "{:.PRECISION$} {:.PRECISION$} {:.PRECISION$}",
            p.x, p.y, p.z
        )?;
    }
    Ok(grid.len())
}

/// Export a grid to a point list file
pub fn write_points(path: impl AsRef<Path>, grid: &PointGrid) -> Result<ExportSummary> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let vertex_count = write_points_to(&mut writer, grid)?;
    writer.flush()?;

    debug!(path = %path.display(), vertex_count, "wrote point list");

    Ok(ExportSummary {
        path: path.to_path_buf(),
        format: ExportFormat::Points,
        vertex_count,
        face_count: 0,
    })
}

/// Read a point list back
///
/// Blank lines are skipped; any other line must hold exactly three numbers.
pub fn read_points(path: impl AsRef<Path>) -> Result<Vec<DVec3>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut points = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let parse_error = || {
            Error::Export(format!(
                "{}:{}: expected three coordinates, got {:?}",
                path.display(),
                line_no + 1,
                line
            ))
        };

        let coords: Vec<f64> = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| parse_error())?;
        let [x, y, z] = coords[..] else {
            return Err(parse_error());
        };
        points.push(DVec3::new(x, y, z));
    }

    Ok(points)
}
