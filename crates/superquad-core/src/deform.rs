//! Global deformations of sampled surfaces
//!
//! Deformations act on an already sampled [`PointGrid`] and always return a
//! new grid of the same shape, so they can be chained in any order and the
//! mesh writer can still triangulate the result.

use crate::grid::PointGrid;
use crate::{Error, Result};
use glam::DVec3;

/// A point-grid transform
pub trait Deformation: Send + Sync {
    /// Transform every point of `grid` into a new grid of the same shape
    fn apply(&self, grid: &PointGrid) -> PointGrid;
}

// ============================================================================
// Tapering
// ============================================================================

/// Tapering along the Z axis
///
/// Each cross-section is scaled by `r = k * z`:
/// `x' = r * x`, `y' = r * y`, `z' = z`.
/// A zero coefficient is a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxialTaper {
    pub k: f64,
}

impl AxialTaper {
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl Deformation for AxialTaper {
    fn apply(&self, grid: &PointGrid) -> PointGrid {
        let k = self.k;
        if k == 0.0 {
            return grid.clone();
        }
        grid.map_points(|p| {
            let r = k * p.z;
            DVec3::new(r * p.x, r * p.y, p.z)
        })
    }
}

// ============================================================================
// Bending
// ============================================================================

/// Bending along the Z axis
///
/// `alpha` is the direction of the bend in the XY plane and `k` the
/// curvature: the Z axis is mapped onto a circular arc of radius `1 / k`
/// while cross-sections keep their shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxialBend {
    alpha: f64,
    k: f64,
    k_inv: f64,
}

impl AxialBend {
    /// Fails unless `k` is finite and non-zero
    pub fn new(alpha: f64, k: f64) -> Result<Self> {
        if k == 0.0 || !k.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "bend curvature must be finite and non-zero, got {k}"
            )));
        }
        Ok(Self {
            alpha,
            k,
            k_inv: k.recip(),
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    fn bend_point(&self, p: DVec3) -> DVec3 {
        let beta = p.y.atan2(p.x);
        let r = (self.alpha - beta).cos() * p.x.hypot(p.y);
        let gamma = p.z * self.k_inv;
        let big_r = self.k_inv - gamma.cos() * (self.k_inv - r);

        DVec3::new(
            p.x + self.alpha.cos() * (big_r - r),
            p.y + self.alpha.sin() * (big_r - r),
            gamma.sin() * (self.k_inv - r),
        )
    }
}

impl Deformation for AxialBend {
    fn apply(&self, grid: &PointGrid) -> PointGrid {
        grid.map_points(|p| self.bend_point(p))
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Deformations applied in insertion order
#[derive(Default)]
pub struct DeformationChain {
    steps: Vec<Box<dyn Deformation>>,
}

impl DeformationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a deformation (builder style)
    pub fn then<D: Deformation + 'static>(mut self, deformation: D) -> Self {
        self.push(deformation);
        self
    }

    pub fn push<D: Deformation + 'static>(&mut self, deformation: D) {
        self.steps.push(Box::new(deformation));
    }

    pub fn push_boxed(&mut self, deformation: Box<dyn Deformation>) {
        self.steps.push(deformation);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Deformation for DeformationChain {
    fn apply(&self, grid: &PointGrid) -> PointGrid {
        let mut current = grid.clone();
        for step in &self.steps {
            current = step.apply(&current);
        }
        current
    }
}

impl std::fmt::Debug for DeformationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeformationChain")
            .field("steps", &self.steps.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Sampler, superellipsoid, supertoroid};
    use approx::assert_relative_eq;

    fn rounded_cube() -> PointGrid {
        superellipsoid([0.5, 0.5, 0.5], [1.0, 1.0, 1.0])
            .sample(10)
            .unwrap()
    }

    fn flat_grid() -> PointGrid {
        let xs: Vec<f64> = (0..16).map(|i| (i % 4) as f64 * 0.5 - 0.75).collect();
        let ys: Vec<f64> = (0..16).map(|i| (i / 4) as f64 * 0.5 - 0.75).collect();
        PointGrid::new(4, 4, xs, ys, vec![0.0; 16]).unwrap()
    }

    // ------------------------------------------------------------------------
    // Tapering
    // ------------------------------------------------------------------------

    #[test]
    fn zero_taper_is_identity() {
        let grid = rounded_cube();
        let tapered = AxialTaper::new(0.0).apply(&grid);
        assert_eq!(tapered, grid);
    }

    #[test]
    fn taper_scales_cross_sections_by_height() {
        let grid = rounded_cube();
        let tapered = AxialTaper::new(0.5).apply(&grid);
        assert_eq!(tapered.shape(), grid.shape());

        for (p, t) in grid.points().zip(tapered.points()) {
            assert_relative_eq!(t.x, 0.5 * p.z * p.x, epsilon = 1e-12);
            assert_relative_eq!(t.y, 0.5 * p.z * p.y, epsilon = 1e-12);
            assert_eq!(t.z, p.z);
        }
    }

    #[test]
    fn taper_does_not_touch_its_input() {
        let grid = rounded_cube();
        let copy = grid.clone();
        let _ = AxialTaper::new(2.0).apply(&grid);
        assert_eq!(grid, copy);
    }

    // ------------------------------------------------------------------------
    // Bending
    // ------------------------------------------------------------------------

    #[test]
    fn bend_rejects_degenerate_curvature() {
        assert!(matches!(
            AxialBend::new(0.3, 0.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(AxialBend::new(0.3, f64::NAN).is_err());
        assert!(AxialBend::new(0.3, f64::INFINITY).is_err());
        assert!(AxialBend::new(0.3, -0.5).is_ok());
    }

    #[test]
    fn bending_flat_grid_keeps_it_flat() {
        let grid = flat_grid();
        let bent = AxialBend::new(-1.5, 0.5).unwrap().apply(&grid);
        assert_eq!(bent.shape(), grid.shape());

        for (p, b) in grid.points().zip(bent.points()) {
            assert_eq!(b.z, 0.0);
            assert_relative_eq!(b.x, p.x, epsilon = 1e-12);
            assert_relative_eq!(b.y, p.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn bend_maps_z_axis_onto_arc() {
        let k = 0.5;
        let zs: Vec<f64> = (0..5).map(|i| i as f64 * 0.4 - 0.8).collect();
        let grid = PointGrid::new(1, 5, vec![0.0; 5], vec![0.0; 5], zs).unwrap();
        let bent = AxialBend::new(0.0, k).unwrap().apply(&grid);

        // circle of radius 1/k around (1/k, 0, 0) in the XZ plane
        for p in bent.points() {
            let d = (p.x - 1.0 / k).powi(2) + p.z * p.z;
            assert_relative_eq!(d, 1.0 / (k * k), epsilon = 1e-12);
            assert_relative_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn bend_direction_follows_alpha() {
        let grid = PointGrid::new(1, 1, vec![0.0], vec![0.0], vec![1.0]).unwrap();
        let alpha = std::f64::consts::FRAC_PI_2;
        let p = AxialBend::new(alpha, 1.0).unwrap().apply(&grid).point(0, 0);

        // displacement lies along +Y
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0 - 1.0_f64.cos(), epsilon = 1e-12);
        assert_relative_eq!(p.z, 1.0_f64.sin(), epsilon = 1e-12);
    }

    // ------------------------------------------------------------------------
    // Composition
    // ------------------------------------------------------------------------

    #[test]
    fn chain_applies_in_order() {
        let grid = supertoroid([1.0, 1.0], [1.0, 1.0, 1.0, 2.0]).sample(8).unwrap();
        let taper = AxialTaper::new(0.3);
        let bend = AxialBend::new(0.7, 0.4).unwrap();

        let chained = DeformationChain::new().then(taper).then(bend).apply(&grid);
        let manual = bend.apply(&taper.apply(&grid));
        assert_eq!(chained, manual);

        let reversed = DeformationChain::new().then(bend).then(taper).apply(&grid);
        assert_eq!(reversed, taper.apply(&bend.apply(&grid)));
        assert_eq!(reversed.shape(), grid.shape());
    }

    #[test]
    fn empty_chain_is_identity() {
        let grid = rounded_cube();
        let chain = DeformationChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.apply(&grid), grid);
    }
}
