//! Command-line description of a primitive

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use superquad_core::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Family {
    Superellipsoid,
    Superhyperboloid,
    Supertoroid,
    Blended,
}

#[derive(Debug, Clone, Args)]
pub struct ShapeArgs {
    /// Primitive family
    #[arg(value_enum)]
    pub family: Family,

    /// Exponents, comma separated (3 values, 2 for supertoroid and blended)
    #[arg(short, long, value_delimiter = ',')]
    pub epsilon: Option<Vec<f64>>,

    /// Semi-axes, comma separated (3 values, 4 for supertoroid)
    #[arg(short = 'a', long = "axes", value_delimiter = ',')]
    pub a: Option<Vec<f64>>,

    /// Uniform scale of the blended superellipsoid
    #[arg(long, default_value = "1")]
    pub scale: f64,

    /// Height-coupled taper of the blended superellipsoid: T0,T1
    #[arg(long, value_delimiter = ',', default_value = "0,0", allow_hyphen_values = true)]
    pub coupled_taper: Vec<f64>,

    /// Bulge of the blended superellipsoid: MAGNITUDE,OFFSET,FREQUENCY
    #[arg(long, value_delimiter = ',', default_value = "0,0,0", allow_hyphen_values = true)]
    pub blend: Vec<f64>,
}

/// Convert a flag's values to a fixed-size array, or use `default` when absent
fn fixed<const N: usize>(name: &str, values: Option<&[f64]>, default: f64) -> Result<[f64; N]> {
    let Some(values) = values else {
        return Ok([default; N]);
    };
    match <[f64; N]>::try_from(values) {
        Ok(array) => Ok(array),
        Err(_) => bail!("--{name} needs {} values, got {}", N, values.len()),
    }
}

impl ShapeArgs {
    pub fn to_primitive(&self) -> Result<Primitive> {
        let epsilon = self.epsilon.as_deref();
        let a = self.a.as_deref();

        Ok(match self.family {
            Family::Superellipsoid => {
                superellipsoid(fixed("epsilon", epsilon, 1.0)?, fixed("axes", a, 1.0)?).into()
            }
            Family::Superhyperboloid => {
                superhyperboloid(fixed("epsilon", epsilon, 1.0)?, fixed("axes", a, 1.0)?).into()
            }
            Family::Supertoroid => {
                supertoroid(fixed("epsilon", epsilon, 1.0)?, fixed("axes", a, 2.0)?).into()
            }
            Family::Blended => blended_superellipsoid(
                fixed("epsilon", epsilon, 1.0)?,
                self.scale,
                fixed("coupled-taper", Some(self.coupled_taper.as_slice()), 0.0)?,
                fixed("blend", Some(self.blend.as_slice()), 0.0)?,
            )
            .into(),
        })
    }
}
