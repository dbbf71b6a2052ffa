//! OBJ mesh export
//!
//! Vertices are written row-major, one `v` line per grid point. Each grid
//! quad is split into two triangles along a fixed diagonal:
//!
//! ```text
//!   (i, j) ---- (i, j+1)
//!     |        /   |
//!     |      /     |
//!     |    /       |
//!  (i+1, j) -- (i+1, j+1)
//! ```
//!
//! With 1-based indices `v(i, j) = i * cols + j + 1` the faces are
//! `[v(i+1, j), v(i, j+1), v(i, j)]` and `[v(i+1, j+1), v(i, j+1), v(i+1, j)]`.

use super::{ExportFormat, ExportSummary, PRECISION};
use crate::Result;
use crate::grid::PointGrid;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Triangles of a `rows x cols` grid, 1-based, shifted by `offset` vertices
pub fn quad_faces(rows: usize, cols: usize, offset: usize) -> Vec<[usize; 3]> {
    if rows < 2 || cols < 2 {
        return Vec::new();
    }

    let mut faces = Vec::with_capacity(2 * (rows - 1) * (cols - 1));
    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            let v = |r: usize, c: usize| r * cols + c + 1 + offset;
            faces.push([v(i + 1, j), v(i, j + 1), v(i, j)]);
            faces.push([v(i + 1, j + 1), v(i, j + 1), v(i + 1, j)]);
        }
    }
    faces
}

fn write_vertex<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> std::io::Result<()> {
    writeln!(writer, "v {x:.PRECISION$} {y:.PRECISION$} {z:.PRECISION$}")
}

fn within(threshold: f64, x: f64, y: f64, z: f64) -> bool {
    // NaN compares false and is dropped along with the outliers
    [x, y, z].iter().all(|c| c.abs() <= threshold)
}

/// Write one grid as an OBJ mesh to any writer
///
/// With a `threshold`, vertices with any coordinate magnitude above it are
/// skipped and no faces are written, since the remaining indices no longer
/// follow the grid. Returns `(vertices, faces)` written.
pub fn write_mesh_to<W: Write>(
    writer: &mut W,
    grid: &PointGrid,
    threshold: Option<f64>,
) -> Result<(usize, usize)> {
    let mut vertex_count = 0;
    for ((&x, &y), &z) in grid.x().iter().zip(grid.y()).zip(grid.z()) {
        if threshold.is_some_and(|t| !within(t, x, y, z)) {
            continue;
        }
        write_vertex(writer, x, y, z)?;
        vertex_count += 1;
    }

    if threshold.is_some() {
        return Ok((vertex_count, 0));
    }

    let faces = quad_faces(grid.rows(), grid.cols(), 0);
    for [a, b, c] in &faces {
        writeln!(writer, "f {a} {b} {c}")?;
    }

    Ok((vertex_count, faces.len()))
}

/// Write several grids into one OBJ stream
///
/// Each grid's vertices are followed by its own faces, with indices offset by
/// the number of vertices of all grids before it.
pub fn write_multi_mesh_to<W: Write>(writer: &mut W, grids: &[PointGrid]) -> Result<(usize, usize)> {
    let mut offset = 0;
    let mut face_count = 0;

    for grid in grids {
        for ((&x, &y), &z) in grid.x().iter().zip(grid.y()).zip(grid.z()) {
            write_vertex(writer, x, y, z)?;
        }
        let faces = quad_faces(grid.rows(), grid.cols(), offset);
        for [a, b, c] in &faces {
            writeln!(writer, "f {a} {b} {c}")?;
        }

        offset += grid.len();
        face_count += faces.len();
    }

    Ok((offset, face_count))
}

/// Export a grid to an OBJ file
pub fn write_mesh(
    path: impl AsRef<Path>,
    grid: &PointGrid,
    threshold: Option<f64>,
) -> Result<ExportSummary> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let (vertex_count, face_count) = write_mesh_to(&mut writer, grid, threshold)?;
    writer.flush()?;

    if vertex_count < grid.len() {
        debug!(
            dropped = grid.len() - vertex_count,
            "vertices outside the threshold were skipped"
        );
    }
    debug!(path = %path.display(), vertex_count, face_count, "wrote mesh");

    Ok(ExportSummary {
        path: path.to_path_buf(),
        format: ExportFormat::Obj,
        vertex_count,
        face_count,
    })
}

/// Export several grids into a single OBJ file
pub fn write_multi_mesh(path: impl AsRef<Path>, grids: &[PointGrid]) -> Result<ExportSummary> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let (vertex_count, face_count) = write_multi_mesh_to(&mut writer, grids)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        grids = grids.len(),
        vertex_count,
        face_count,
        "wrote combined mesh"
    );

    Ok(ExportSummary {
        path: path.to_path_buf(),
        format: ExportFormat::Obj,
        vertex_count,
        face_count,
    })
}
