//! # Superquad Core
//!
//! Discretized surfaces of the superquadric families and global deformations
//! on top of them.
//!
//! Every shape is sampled over a regular `(n + 1) x (n + 1)` grid of angular
//! parameters `(eta, w)` and returned as a [`PointGrid`](grid::PointGrid): three
//! arrays of coordinates that keep the grid adjacency, so the same grid can be
//! deformed any number of times and finally triangulated on export.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use superquad_core::prelude::*;
//!
//! // A rounded cube, pinched towards the top and bent sideways
//! let grid = superellipsoid([0.5, 0.5, 0.5], [1.0, 1.0, 1.0]).sample(24)?;
//! let grid = DeformationChain::new()
//!     .then(AxialTaper::new(0.5))
//!     .then(AxialBend::new(-1.5, 0.5)?)
//!     .apply(&grid);
//!
//! write_mesh("cube.obj", &grid, None)?;
//! ```
//!
//! ## Conventions
//!
//! - **Angles**: radians. `eta` is the latitude-like parameter, `w` the longitude.
//! - **Exponents**: `epsilon = 2 / r` for a roundness `r`; `epsilon = 1` is an ellipsoid.
//! - **Precision**: `f64` throughout; exported files use three decimals.
//! - **Coordinate system**: right-handed, Z-up (deformations act along Z).

pub mod batch;
pub mod deform;
pub mod export;
pub mod grid;
pub mod job;
pub mod power;
pub mod primitives;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Sampling
    pub use crate::grid::{AngularGrid, AngularRange, PointGrid, make_grid};
    pub use crate::primitives::{
        BlendedSuperellipsoid, Primitive, Sampler, Superellipsoid, Superhyperboloid, Supertoroid,
        blended_superellipsoid, superellipsoid, superhyperboloid, supertoroid,
    };

    // Deformations
    pub use crate::deform::{AxialBend, AxialTaper, Deformation, DeformationChain};

    // Export
    pub use crate::export::{
        ExportFormat, ExportSummary, read_points, write_mesh, write_multi_mesh, write_points,
    };

    // Batch + jobs
    pub use crate::batch::{SweepConfig, SweepFamily, SweepReport, produce_array};
    pub use crate::job::{DeformationSpec, Job};

    // Math (re-export glam)
    pub use glam::DVec3;

    // Error handling
    pub use crate::{Error, Result};
}
