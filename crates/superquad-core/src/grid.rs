//! Angular parameter grids and the point grids sampled from them
//!
//! Both grids are `rows x cols` arrays stored row-major. Row `i` of an
//! [`AngularGrid`] holds a constant `eta`, column `j` a constant `w`, and the
//! [`PointGrid`] produced from it keeps that layout, which is what the mesh
//! writer relies on when it triangulates neighbouring samples.

use crate::{Error, Result};
use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

// ============================================================================
// Angular grid
// ============================================================================

/// A closed interval of angles, in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularRange {
    pub min: f64,
    pub max: f64,
}

impl AngularRange {
    /// Default latitude range `[-pi/2, pi/2]`
    pub const HALF_TURN: Self = Self::new(-FRAC_PI_2, FRAC_PI_2);

    /// Default longitude range (and the supertoroid latitude) `[-pi, pi]`
    pub const FULL_TURN: Self = Self::new(-PI, PI);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Uniform step for `n` intervals
    pub fn step(&self, n: usize) -> f64 {
        self.span() / n as f64
    }
}

/// Uniform `(eta, w)` sampling grid of shape `(n + 1) x (n + 1)`
#[derive(Debug, Clone, PartialEq)]
pub struct AngularGrid {
    rows: usize,
    cols: usize,
    eta: Vec<f64>,
    w: Vec<f64>,
}

impl AngularGrid {
    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.eta.len()
    }

    /// Row-major `eta` values
    pub fn eta(&self) -> &[f64] {
        &self.eta
    }

    /// Row-major `w` values
    pub fn w(&self) -> &[f64] {
        &self.w
    }

    pub fn is_empty(&self) -> bool {
        self.eta.is_empty()
    }

    /// `(eta, w)` at grid position `(i, j)`
    pub fn at(&self, i: usize, j: usize) -> (f64, f64) {
        let idx = i * self.cols + j;
        (self.eta[idx], self.w[idx])
    }

    /// Evaluate `f(eta, w)` at every grid point, in parallel
    pub fn evaluate<F>(&self, f: F) -> PointGrid
    where
        F: Fn(f64, f64) -> DVec3 + Sync,
    {
        let points: Vec<DVec3> = self
            .eta
            .par_iter()
            .zip(self.w.par_iter())
            .map(|(&eta, &w)| f(eta, w))
            .collect();

        PointGrid::from_points(self.rows, self.cols, &points)
    }
}

/// Build the angular grid for resolution `n`
///
/// Both ranges are split into `n` equal steps and both endpoints are kept, so
/// full-period ranges produce a duplicated seam row/column.
pub fn make_grid(n: usize, eta_range: AngularRange, w_range: AngularRange) -> Result<AngularGrid> {
    if n == 0 {
        return Err(Error::InvalidParameter(
            "grid resolution must be at least 1".to_string(),
        ));
    }

    let size = n
        .checked_add(1)
        .filter(|size| size.checked_mul(*size).is_some())
        .ok_or_else(|| Error::InvalidParameter(format!("grid resolution {n} is too large")))?;
    let deta = eta_range.step(n);
    let dw = w_range.step(n);

    let mut eta = Vec::with_capacity(size * size);
    let mut w = Vec::with_capacity(size * size);
    for i in 0..size {
        for j in 0..size {
            eta.push(eta_range.min + i as f64 * deta);
            w.push(w_range.min + j as f64 * dw);
        }
    }

    Ok(AngularGrid {
        rows: size,
        cols: size,
        eta,
        w,
    })
}

// ============================================================================
// Point grid
// ============================================================================

/// Structured sampling of a surface: three coordinate arrays of one shape
#[derive(Debug, Clone, PartialEq)]
pub struct PointGrid {
    rows: usize,
    cols: usize,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl PointGrid {
    /// Create a grid from row-major coordinate arrays
    ///
    /// Fails when any array does not hold exactly `rows * cols` values.
    pub fn new(rows: usize, cols: usize, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        let expected = rows * cols;
        for len in [x.len(), y.len(), z.len()] {
            if len != expected {
                return Err(Error::ShapeMismatch {
                    expected,
                    actual: len,
                });
            }
        }
        Ok(Self { rows, cols, x, y, z })
    }

    /// Split a row-major list of points into coordinate arrays
    ///
    /// Callers guarantee `points.len() == rows * cols`.
    fn from_points(rows: usize, cols: usize, points: &[DVec3]) -> Self {
        debug_assert_eq!(points.len(), rows * cols);
        Self {
            rows,
            cols,
            x: points.iter().map(|p| p.x).collect(),
            y: points.iter().map(|p| p.y).collect(),
            z: points.iter().map(|p| p.z).collect(),
        }
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Mutable coordinate slices; values can change but the shape cannot
    pub fn coords_mut(&mut self) -> (&mut [f64], &mut [f64], &mut [f64]) {
        (&mut self.x, &mut self.y, &mut self.z)
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Point at grid position `(i, j)`
    pub fn point(&self, i: usize, j: usize) -> DVec3 {
        let idx = i * self.cols + j;
        DVec3::new(self.x[idx], self.y[idx], self.z[idx])
    }

    /// Points in row-major order
    pub fn points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| DVec3::new(x, y, z))
    }

    /// Apply `f` to every point, in parallel, keeping the grid shape
    pub fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(DVec3) -> DVec3 + Sync,
    {
        let points: Vec<DVec3> = (0..self.len())
            .into_par_iter()
            .map(|idx| f(DVec3::new(self.x[idx], self.y[idx], self.z[idx])))
            .collect();

        Self::from_points(self.rows, self.cols, &points)
    }

    /// Shift every point by `offset`
    pub fn translate(&self, offset: DVec3) -> Self {
        self.map_points(|p| p + offset)
    }

    /// Componentwise `(min, max)` corners, or `None` for an empty grid
    ///
    /// Non-finite coordinates take part in the comparison like any other value.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let mut points = self.points();
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}
