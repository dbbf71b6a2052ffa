//! JSON job descriptions
//!
//! A job names one primitive, the deformations applied to it in order, and
//! where the result goes:
//!
//! ```json
//! {
//!   "primitive": { "family": "superellipsoid", "epsilon": [1.0, 1.0, 1.0], "a": [1.0, 1.0, 1.0] },
//!   "resolution": 20,
//!   "deformations": [
//!     { "kind": "taper", "k": 0.5 },
//!     { "kind": "bend", "alpha": -1.5, "k": 0.5 }
//!   ],
//!   "output": "bent.obj"
//! }
//! ```

use crate::Result;
use crate::deform::{AxialBend, AxialTaper, Deformation, DeformationChain};
use crate::export::{ExportSummary, export};
use crate::grid::PointGrid;
use crate::primitives::{Primitive, Sampler};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

fn default_resolution() -> usize {
    20
}

/// Serializable form of a deformation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeformationSpec {
    Taper { k: f64 },
    Bend { alpha: f64, k: f64 },
}

impl DeformationSpec {
    /// Build the deformation, validating its parameters
    pub fn build(&self) -> Result<Box<dyn Deformation>> {
        Ok(match *self {
            Self::Taper { k } => Box::new(AxialTaper::new(k)),
            Self::Bend { alpha, k } => Box::new(AxialBend::new(alpha, k)?),
        })
    }
}

/// One primitive, its deformations and its export target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub primitive: Primitive,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default)]
    pub deformations: Vec<DeformationSpec>,
    /// Output file; the format follows the extension
    pub output: PathBuf,
    /// Magnitude above which mesh vertices are dropped
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl Job {
    pub fn new(primitive: impl Into<Primitive>, output: impl Into<PathBuf>) -> Self {
        Self {
            primitive: primitive.into(),
            resolution: default_resolution(),
            deformations: Vec::new(),
            output: output.into(),
            threshold: None,
        }
    }

    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_deformation(mut self, deformation: DeformationSpec) -> Self {
        self.deformations.push(deformation);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Parse a job from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a job from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validated deformation chain of this job
    pub fn chain(&self) -> Result<DeformationChain> {
        let mut chain = DeformationChain::new();
        for spec in &self.deformations {
            chain.push_boxed(spec.build()?);
        }
        Ok(chain)
    }

    /// Sample the primitive and apply the deformations, without writing anything
    pub fn evaluate(&self) -> Result<PointGrid> {
        // build first so an invalid deformation fails before sampling
        let chain = self.chain()?;
        let grid = self.primitive.sample(self.resolution)?;
        Ok(chain.apply(&grid))
    }

    /// Evaluate and export
    pub fn run(&self) -> Result<ExportSummary> {
        info!(
            family = self.primitive.name(),
            resolution = self.resolution,
            deformations = self.deformations.len(),
            "running job"
        );
        let grid = self.evaluate()?;
        export(&self.output, &grid, self.threshold)
    }
}
