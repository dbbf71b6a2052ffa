//! Roundness sweeps laid out as a grid of shapes
//!
//! A sweep samples one shape per `(r, s)` roundness pair, writes each cell as
//! its own point list and then translates the cells apart into a single
//! combined mesh, which makes the effect of the exponents easy to compare.

use crate::export::{ExportSummary, write_multi_mesh, write_points};
use crate::grid::PointGrid;
use crate::primitives::{Sampler, superellipsoid, supertoroid};
use crate::{Error, Result};
use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which family is swept, with the parameters held fixed across cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum SweepFamily {
    /// `epsilon = [2/r, 2/s, 2/t]`
    Superellipsoid { t: f64, a: [f64; 3] },
    /// `epsilon = [2/r, 2/s]`
    Supertoroid { a: [f64; 4] },
}

impl SweepFamily {
    /// Directory and file stem used for this family's output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Superellipsoid { .. } => "superellipsoid",
            Self::Supertoroid { .. } => "supertoroids",
        }
    }

    fn sample(&self, r: f64, s: f64, n: usize) -> Result<PointGrid> {
        match *self {
            Self::Superellipsoid { t, a } => superellipsoid([2.0 / r, 2.0 / s, 2.0 / t], a).sample(n),
            Self::Supertoroid { a } => supertoroid([2.0 / r, 2.0 / s], a).sample(n),
        }
    }
}

/// Configuration for a roundness sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub family: SweepFamily,
    /// Steps per roundness axis; the sweep has `(n_choice + 1)^2` cells
    pub n_choice: usize,
    /// `(min, max)` of the roundness `r`, varied along columns
    pub r_range: (f64, f64),
    /// `(min, max)` of the roundness `s`, varied along rows
    pub s_range: (f64, f64),
    /// Distance between neighbouring cells in the combined mesh
    pub cell_spacing: f64,
    /// Sampling resolution of every cell
    pub resolution: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::superellipsoids()
    }
}

impl SweepConfig {
    /// 31 x 31 unit superellipsoids with `t = 2`
    pub fn superellipsoids() -> Self {
        Self {
            family: SweepFamily::Superellipsoid {
                t: 2.0,
                a: [1.0, 1.0, 1.0],
            },
            n_choice: 30,
            r_range: (1.0, 10.0),
            s_range: (1.0, 10.0),
            cell_spacing: 3.5,
            resolution: 20,
        }
    }

    /// 9 x 9 supertoroids with all scales set to 2
    pub fn supertoroids() -> Self {
        Self {
            family: SweepFamily::Supertoroid {
                a: [2.0, 2.0, 2.0, 2.0],
            },
            n_choice: 8,
            r_range: (1.0, 10.0),
            s_range: (1.0, 10.0),
            cell_spacing: 14.0,
            resolution: 20,
        }
    }

    pub fn with_n_choice(mut self, n_choice: usize) -> Self {
        self.n_choice = n_choice;
        self
    }

    pub fn with_r_range(mut self, min: f64, max: f64) -> Self {
        self.r_range = (min, max);
        self
    }

    pub fn with_s_range(mut self, min: f64, max: f64) -> Self {
        self.s_range = (min, max);
        self
    }

    pub fn with_cell_spacing(mut self, spacing: f64) -> Self {
        self.cell_spacing = spacing;
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Roundness pair `(r, s)` of cell `(i, j)`
    pub fn roundness(&self, i: usize, j: usize) -> (f64, f64) {
        let steps = self.n_choice as f64;
        let dr = (self.r_range.1 - self.r_range.0) / steps;
        let ds = (self.s_range.1 - self.s_range.0) / steps;
        (
            self.r_range.0 + j as f64 * dr,
            self.s_range.0 + i as f64 * ds,
        )
    }

    fn validate(&self) -> Result<()> {
        if self.n_choice == 0 {
            return Err(Error::InvalidParameter(
                "sweep needs at least one step per axis".to_string(),
            ));
        }
        let ranges = [self.r_range.0, self.r_range.1, self.s_range.0, self.s_range.1];
        if ranges.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "roundness ranges must be positive, got r {:?} s {:?}",
                self.r_range, self.s_range
            )));
        }
        if let SweepFamily::Superellipsoid { t, .. } = self.family
            && (!t.is_finite() || t <= 0.0)
        {
            return Err(Error::InvalidParameter(format!(
                "roundness t must be positive, got {t}"
            )));
        }
        Ok(())
    }
}

/// What a sweep wrote
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// Number of cells sampled
    pub cells: usize,
    /// Directory holding the per-cell point lists
    pub points_dir: PathBuf,
    /// The combined mesh
    pub mesh: ExportSummary,
}

/// Run a sweep into `dir`
///
/// Writes `<dir>/<family>/<i>_<j>.pts` per cell and `<dir>/all_<family>.obj`
/// with cell `(i, j)` shifted by `(spacing * j, spacing * i)` in the XY plane.
pub fn produce_array(dir: impl AsRef<Path>, config: &SweepConfig) -> Result<SweepReport> {
    config.validate()?;

    let dir = dir.as_ref();
    let family = config.family.name();
    let points_dir = dir.join(family);
    fs::create_dir_all(&points_dir)?;

    let side = config.n_choice + 1;
    info!(
        family,
        cells = side * side,
        resolution = config.resolution,
        "sampling roundness sweep"
    );

    let grids = (0..side * side)
        .into_par_iter()
        .map(|cell| -> Result<PointGrid> {
            let (i, j) = (cell / side, cell % side);
            let (r, s) = config.roundness(i, j);
            let grid = config.family.sample(r, s, config.resolution)?;

            write_points(points_dir.join(format!("{i}_{j}.pts")), &grid)?;
            debug!(i, j, r, s, "wrote sweep cell");

            let spacing = config.cell_spacing;
            let offset = DVec3::new(spacing * j as f64, spacing * i as f64, 0.0);
            Ok(grid.translate(offset))
        })
        .collect::<Result<Vec<_>>>()?;

    let mesh = write_multi_mesh(dir.join(format!("all_{family}.obj")), &grids)?;
    info!(%mesh, "sweep complete");

    Ok(SweepReport {
        cells: grids.len(),
        points_dir,
        mesh,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roundness_varies_r_along_columns() {
        let config = SweepConfig::superellipsoids().with_n_choice(3).with_r_range(1.0, 4.0);
        assert_eq!(config.roundness(0, 0), (1.0, 1.0));

        let (r, s) = config.roundness(2, 3);
        assert_relative_eq!(r, 4.0);
        assert_relative_eq!(s, 7.0);
    }

    #[test]
    fn test_presets() {
        let toroids = SweepConfig::supertoroids();
        assert_eq!(toroids.n_choice, 8);
        assert_eq!(toroids.family.name(), "supertoroids");
        assert_relative_eq!(toroids.cell_spacing, 14.0);

        let ellipsoids = SweepConfig::default();
        assert_eq!(ellipsoids.n_choice, 30);
        assert_relative_eq!(ellipsoids.cell_spacing, 3.5);
    }

    #[test]
    fn test_invalid_sweeps_are_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let config = SweepConfig::superellipsoids().with_n_choice(0);
        assert!(matches!(produce_array(dir.path(), &config), Err(Error::InvalidParameter(_))));

        let config = SweepConfig::superellipsoids().with_r_range(0.0, 2.0);
        assert!(matches!(produce_array(dir.path(), &config), Err(Error::InvalidParameter(_))));

        let mut config = SweepConfig::superellipsoids().with_n_choice(1);
        config.family = SweepFamily::Superellipsoid {
            t: -2.0,
            a: [1.0, 1.0, 1.0],
        };
        assert!(matches!(produce_array(dir.path(), &config), Err(Error::InvalidParameter(_))));

        // t only constrains superellipsoid sweeps
        assert!(SweepConfig::supertoroids().with_n_choice(1).validate().is_ok());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SweepConfig::supertoroids().with_resolution(6);
        let json = serde_json::to_string(&config).unwrap();
        let back: SweepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
