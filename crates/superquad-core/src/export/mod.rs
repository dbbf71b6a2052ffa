//! Export of point grids to point files and OBJ meshes

mod obj;
mod points;

use crate::grid::PointGrid;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

pub use obj::{quad_faces, write_mesh, write_mesh_to, write_multi_mesh, write_multi_mesh_to};
pub use points::{read_points, write_points, write_points_to};

/// Decimal places used for every coordinate written
pub const PRECISION: usize = 3;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Wavefront OBJ with `v` and `f` lines
    #[default]
    Obj,
    /// Plain `x y z` lines
    Points,
}

impl ExportFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "obj" => Some(Self::Obj),
            "pts" | "xyz" => Some(Self::Points),
            _ => None,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Points => "pts",
        }
    }

    /// Get a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            Self::Obj => "OBJ",
            Self::Points => "Point list",
        }
    }
}

/// Result of a successful export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Path where the file was written
    pub path: PathBuf,

    /// Format used for export
    pub format: ExportFormat,

    /// Number of vertex lines written
    pub vertex_count: usize,

    /// Number of triangles written (always 0 for point lists)
    pub face_count: usize,
}

impl std::fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Exported {} ({}, {} vertices, {} triangles)",
            self.path.display(),
            self.format.name(),
            self.vertex_count,
            self.face_count
        )
    }
}

/// Export a grid, picking the format from the file extension
///
/// `threshold` only applies to meshes; point lists are always written whole.
pub fn export(path: impl AsRef<Path>, grid: &PointGrid, threshold: Option<f64>) -> Result<ExportSummary> {
    let path = path.as_ref();
    match ExportFormat::from_extension(path) {
        Some(ExportFormat::Obj) => write_mesh(path, grid, threshold),
        Some(ExportFormat::Points) => write_points(path, grid),
        None => Err(Error::Export(format!(
            "Unknown file extension: {}",
            path.display()
        ))),
    }
}
