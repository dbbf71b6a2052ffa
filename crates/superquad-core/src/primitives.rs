//! Superquadric primitive samplers
//!
//! Every family maps the angular grid to surface points through a closed-form
//! formula built from the signed power functions. All shapes are centered at
//! the origin with Z as the polar axis; use deformations or
//! [`PointGrid::translate`] to move them.

use crate::grid::{AngularRange, PointGrid, make_grid};
use crate::power::{signed_cos, signed_sec, signed_sin, signed_tan};
use crate::{Error, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Anything that can be sampled into a point grid at a given resolution
pub trait Sampler {
    /// Sample the surface on an `(n + 1) x (n + 1)` grid
    fn sample(&self, n: usize) -> Result<PointGrid>;
}

// ============================================================================
// Constructor functions (ergonomic API)
// ============================================================================

/// Create a superellipsoid with per-axis exponents and semi-axes
pub fn superellipsoid(epsilon: [f64; 3], a: [f64; 3]) -> Superellipsoid {
    Superellipsoid::new(epsilon, a)
}

/// Create a one-piece superhyperboloid
pub fn superhyperboloid(epsilon: [f64; 3], a: [f64; 3]) -> Superhyperboloid {
    Superhyperboloid::new(epsilon, a)
}

/// Create a supertoroid; `a[3]` is the tube offset
pub fn supertoroid(epsilon: [f64; 2], a: [f64; 4]) -> Supertoroid {
    Supertoroid::new(epsilon, a)
}

/// Create a tapered and blended superellipsoid of uniform scale
pub fn blended_superellipsoid(
    epsilon: [f64; 2],
    scale: f64,
    taper: [f64; 2],
    blend: [f64; 3],
) -> BlendedSuperellipsoid {
    BlendedSuperellipsoid::new(epsilon, scale, taper, blend)
}

/// Exponents must be finite and strictly positive
fn check_exponents(epsilon: &[f64]) -> Result<()> {
    match epsilon.iter().find(|e| !e.is_finite() || **e <= 0.0) {
        Some(e) => Err(Error::InvalidParameter(format!(
            "shape exponents must be positive and finite, got {e}"
        ))),
        None => Ok(()),
    }
}

// ============================================================================
// Primitive Structs
// ============================================================================

/// Superellipsoid
///
/// ```text
/// x = a0 * cos(eta)^e0 * cos(w)^e0
/// y = a1 * cos(eta)^e1 * sin(w)^e1
/// z = a2 * sin(eta)^e2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Superellipsoid {
    pub epsilon: [f64; 3],
    pub a: [f64; 3],
}

impl Superellipsoid {
    pub fn new(epsilon: [f64; 3], a: [f64; 3]) -> Self {
        Self { epsilon, a }
    }
}

impl Sampler for Superellipsoid {
    fn sample(&self, n: usize) -> Result<PointGrid> {
        check_exponents(&self.epsilon)?;
        let [e0, e1, e2] = self.epsilon;
        let [a0, a1, a2] = self.a;

        let grid = make_grid(n, AngularRange::HALF_TURN, AngularRange::FULL_TURN)?;
        Ok(grid.evaluate(|eta, w| {
            DVec3::new(
                a0 * signed_cos(eta, e0) * signed_cos(w, e0),
                a1 * signed_cos(eta, e1) * signed_sin(w, e1),
                a2 * signed_sin(eta, e2),
            )
        }))
    }
}

/// Superhyperboloid of one piece
///
/// Same grid as the superellipsoid with `sec`/`tan` in place of `cos`/`sin`
/// for the `eta` terms. The surface is unbounded: rows at `eta = ±pi/2` come
/// out huge or infinite. Filter them on export with a magnitude threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Superhyperboloid {
    pub epsilon: [f64; 3],
    pub a: [f64; 3],
}

impl Superhyperboloid {
    pub fn new(epsilon: [f64; 3], a: [f64; 3]) -> Self {
        Self { epsilon, a }
    }
}

impl Sampler for Superhyperboloid {
    fn sample(&self, n: usize) -> Result<PointGrid> {
        check_exponents(&self.epsilon)?;
        let [e0, e1, e2] = self.epsilon;
        let [a0, a1, a2] = self.a;

        let grid = make_grid(n, AngularRange::HALF_TURN, AngularRange::FULL_TURN)?;
        Ok(grid.evaluate(|eta, w| {
            DVec3::new(
                a0 * signed_sec(eta, e0) * signed_cos(w, e0),
                a1 * signed_sec(eta, e1) * signed_sin(w, e1),
                a2 * signed_tan(eta, e2),
            )
        }))
    }
}

/// Supertoroid
///
/// `eta` spans the full turn so the tube closes on itself.
///
/// ```text
/// x = a0 * (a3 + cos(eta)^e0) * cos(w)^e1
/// y = a1 * (a3 + cos(eta)^e0) * sin(w)^e1
/// z = a2 * sin(eta)^e0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Supertoroid {
    pub epsilon: [f64; 2],
    pub a: [f64; 4],
}

impl Supertoroid {
    pub fn new(epsilon: [f64; 2], a: [f64; 4]) -> Self {
        Self { epsilon, a }
    }
}

impl Sampler for Supertoroid {
    fn sample(&self, n: usize) -> Result<PointGrid> {
        check_exponents(&self.epsilon)?;
        let [e0, e1] = self.epsilon;
        let [a0, a1, a2, a3] = self.a;

        let grid = make_grid(n, AngularRange::FULL_TURN, AngularRange::FULL_TURN)?;
        Ok(grid.evaluate(|eta, w| {
            let ring = a3 + signed_cos(eta, e0);
            DVec3::new(
                a0 * ring * signed_cos(w, e1),
                a1 * ring * signed_sin(w, e1),
                a2 * signed_sin(eta, e0),
            )
        }))
    }
}

/// Superellipsoid with height-coupled tapering and a cosine bulge
///
/// The base surface uses `e0` for every `eta` term and `e1` for the `w`
/// terms, scaled uniformly by `scale`. With `zn = sin(eta)^e0` the height
/// normalized to `[-1, 1]`:
///
/// ```text
/// x = scale * cx * (1 + t0 * zn) + b0 * cos(pi * b2 * (zn - b1))
/// y = scale * cy * (1 + t1 * zn)
/// z = scale * zn
/// ```
///
/// `b0` is the bulge magnitude, `b1` the normalized height it is centered on
/// and `b2` its frequency in half periods per unit of normalized height.
/// This coupling is part of the closed form; it is not the same as applying
/// [`AxialTaper`](crate::deform::AxialTaper) to a superellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendedSuperellipsoid {
    pub epsilon: [f64; 2],
    pub scale: f64,
    #[serde(default)]
    pub taper: [f64; 2],
    #[serde(default)]
    pub blend: [f64; 3],
}

impl BlendedSuperellipsoid {
    pub fn new(epsilon: [f64; 2], scale: f64, taper: [f64; 2], blend: [f64; 3]) -> Self {
        Self {
            epsilon,
            scale,
            taper,
            blend,
        }
    }
}

impl Sampler for BlendedSuperellipsoid {
    fn sample(&self, n: usize) -> Result<PointGrid> {
        check_exponents(&self.epsilon)?;
        let [e0, e1] = self.epsilon;
        let [t0, t1] = self.taper;
        let [b0, b1, b2] = self.blend;
        let s = self.scale;

        let grid = make_grid(n, AngularRange::HALF_TURN, AngularRange::FULL_TURN)?;
        Ok(grid.evaluate(|eta, w| {
            let ce = signed_cos(eta, e0);
            let zn = signed_sin(eta, e0);
            let cx = ce * signed_cos(w, e1);
            let cy = ce * signed_sin(w, e1);

            let bulge = b0 * (PI * b2 * (zn - b1)).cos();
            DVec3::new(
                s * cx * (1.0 + t0 * zn) + bulge,
                s * cy * (1.0 + t1 * zn),
                s * zn,
            )
        }))
    }
}

// ============================================================================
// Tagged dispatch
// ============================================================================

/// Any of the supported primitive families
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Primitive {
    Superellipsoid(Superellipsoid),
    Superhyperboloid(Superhyperboloid),
    Supertoroid(Supertoroid),
    BlendedSuperellipsoid(BlendedSuperellipsoid),
}

impl Primitive {
    /// Family name used in file names and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Superellipsoid(_) => "superellipsoid",
            Self::Superhyperboloid(_) => "superhyperboloid",
            Self::Supertoroid(_) => "supertoroid",
            Self::BlendedSuperellipsoid(_) => "blended_superellipsoid",
        }
    }
}

impl Sampler for Primitive {
    fn sample(&self, n: usize) -> Result<PointGrid> {
        match self {
            Self::Superellipsoid(s) => s.sample(n),
            Self::Superhyperboloid(s) => s.sample(n),
            Self::Supertoroid(s) => s.sample(n),
            Self::BlendedSuperellipsoid(s) => s.sample(n),
        }
    }
}

impl From<Superellipsoid> for Primitive {
    fn from(s: Superellipsoid) -> Self {
        Self::Superellipsoid(s)
    }
}

impl From<Superhyperboloid> for Primitive {
    fn from(s: Superhyperboloid) -> Self {
        Self::Superhyperboloid(s)
    }
}

impl From<Supertoroid> for Primitive {
    fn from(s: Supertoroid) -> Self {
        Self::Supertoroid(s)
    }
}

impl From<BlendedSuperellipsoid> for Primitive {
    fn from(s: BlendedSuperellipsoid) -> Self {
        Self::BlendedSuperellipsoid(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
