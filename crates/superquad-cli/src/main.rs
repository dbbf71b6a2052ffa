//! Superquad CLI - sample, deform and export superquadrics

mod shape;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use shape::ShapeArgs;
use std::path::{Path, PathBuf};
use superquad_core::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "superquad")]
#[command(about = "Superquadric surface sampling, deformation and export", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample one primitive, optionally deform it, and export it
    Generate {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Grid resolution (the grid has n + 1 points per axis)
        #[arg(short = 'n', long, default_value = "20")]
        resolution: usize,

        /// Taper along Z with coefficient K (applied before bending)
        #[arg(long, value_name = "K", allow_hyphen_values = true)]
        taper: Option<f64>,

        /// Bend along Z with orientation ALPHA and curvature K
        #[arg(long, num_args = 2, value_names = ["ALPHA", "K"], allow_hyphen_values = true)]
        bend: Option<Vec<f64>>,

        /// Drop mesh vertices with any coordinate magnitude above this value
        #[arg(long)]
        threshold: Option<f64>,

        /// Output file (.obj or .pts)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run a JSON job file
    Job {
        /// Job description
        path: PathBuf,
    },

    /// Sweep roundness parameters and lay the shapes out in one mesh
    Array {
        /// Family to sweep
        #[arg(value_enum, default_value = "superellipsoid")]
        family: ArrayFamily,

        /// Output directory
        #[arg(short, long, default_value = "res")]
        dir: PathBuf,

        /// Steps per roundness axis (family default if omitted)
        #[arg(long)]
        n_choice: Option<usize>,

        /// Grid resolution of every cell
        #[arg(short = 'n', long, default_value = "20")]
        resolution: usize,

        /// Distance between cells (family default if omitted)
        #[arg(long)]
        spacing: Option<f64>,
    },

    /// Write a sphere before and after a bend
    Demo {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Taper instead of bending, with this coefficient
        #[arg(long, allow_hyphen_values = true)]
        taper: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArrayFamily {
    Superellipsoid,
    Supertoroid,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            shape,
            resolution,
            taper,
            bend,
            threshold,
            output,
        } => {
            run_generate(&shape, resolution, taper, bend.as_deref(), threshold, &output)?;
        }
        Commands::Job { path } => {
            run_job(&path)?;
        }
        Commands::Array {
            family,
            dir,
            n_choice,
            resolution,
            spacing,
        } => {
            run_array(family, &dir, n_choice, resolution, spacing)?;
        }
        Commands::Demo { dir, taper } => {
            run_demo(&dir, taper)?;
        }
    }

    Ok(())
}

fn run_generate(
    shape: &ShapeArgs,
    resolution: usize,
    taper: Option<f64>,
    bend: Option<&[f64]>,
    threshold: Option<f64>,
    output: &Path,
) -> Result<()> {
    let primitive = shape.to_primitive()?;

    let mut job = Job::new(primitive, output).with_resolution(resolution);
    if let Some(k) = taper {
        job = job.with_deformation(DeformationSpec::Taper { k });
    }
    if let Some(&[alpha, k]) = bend {
        job = job.with_deformation(DeformationSpec::Bend { alpha, k });
    }
    if let Some(t) = threshold {
        job = job.with_threshold(t);
    }

    let summary = job.run()?;
    println!("{}", summary);
    Ok(())
}

fn run_job(path: &Path) -> Result<()> {
    let job = Job::load(path).with_context(|| format!("loading job {}", path.display()))?;
    let summary = job.run()?;
    println!("{}", summary);
    Ok(())
}

fn run_array(
    family: ArrayFamily,
    dir: &Path,
    n_choice: Option<usize>,
    resolution: usize,
    spacing: Option<f64>,
) -> Result<()> {
    let mut config = match family {
        ArrayFamily::Superellipsoid => SweepConfig::superellipsoids(),
        ArrayFamily::Supertoroid => SweepConfig::supertoroids(),
    }
    .with_resolution(resolution);

    if let Some(n) = n_choice {
        config = config.with_n_choice(n);
    }
    if let Some(s) = spacing {
        config = config.with_cell_spacing(s);
    }

    let report = produce_array(dir, &config)?;
    println!(
        "Wrote {} cells to {}",
        report.cells,
        report.points_dir.display()
    );
    println!("{}", report.mesh);
    Ok(())
}

fn run_demo(dir: &Path, taper: Option<f64>) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let grid = superellipsoid([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]).sample(10)?;
    let before = write_mesh(dir.join("temp.obj"), &grid, None)?;
    println!("{}", before);

    let deformation = demo_deformation(taper)?;
    info!(taper = taper.is_some(), "deforming demo shape");

    let deformed = deformation.apply(&grid);
    let after = write_mesh(dir.join("temp_d.obj"), &deformed, None)?;
    println!("{}", after);
    Ok(())
}

/// Taper by `k` when given, otherwise the default bend
fn demo_deformation(taper: Option<f64>) -> Result<Box<dyn Deformation>> {
    Ok(match taper {
        Some(k) => Box::new(AxialTaper::new(k)),
        None => Box::new(AxialBend::new(-1.5, 0.5)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape::Family;
    use tempfile::tempdir;

    fn sphere() -> PointGrid {
        superellipsoid([1.0, 1.0, 1.0], [1.0, 1.0, 1.0])
            .sample(10)
            .unwrap()
    }

    /// Contents of the mesh file `write_mesh` produces for `grid`
    fn mesh_text(dir: &Path, name: &str, grid: &PointGrid) -> String {
        let path = dir.join(name);
        write_mesh(&path, grid, None).unwrap();
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_demo_bends_by_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        run_demo(dir.path(), None).unwrap();

        let grid = sphere();
        let bend = AxialBend::new(-1.5, 0.5).unwrap();
        let before = std::fs::read_to_string(dir.path().join("temp.obj")).unwrap();
        let after = std::fs::read_to_string(dir.path().join("temp_d.obj")).unwrap();

        assert_eq!(before, mesh_text(dir.path(), "sphere.obj", &grid));
        assert_eq!(after, mesh_text(dir.path(), "bent.obj", &bend.apply(&grid)));
        assert_ne!(before, after);
    }

    #[test]
    fn test_demo_tapers_when_asked() {
        let dir = tempdir().expect("Failed to create temp dir");
        run_demo(dir.path(), Some(0.5)).unwrap();

        let tapered = AxialTaper::new(0.5).apply(&sphere());
        let after = std::fs::read_to_string(dir.path().join("temp_d.obj")).unwrap();
        assert_eq!(after, mesh_text(dir.path(), "tapered.obj", &tapered));
    }

    #[test]
    fn test_demo_deformation_matches_its_flag() {
        let grid = sphere();
        assert_eq!(demo_deformation(Some(0.0)).unwrap().apply(&grid), grid);
        assert_eq!(
            demo_deformation(Some(2.0)).unwrap().apply(&grid),
            AxialTaper::new(2.0).apply(&grid)
        );
        assert_eq!(
            demo_deformation(None).unwrap().apply(&grid),
            AxialBend::new(-1.5, 0.5).unwrap().apply(&grid)
        );
    }

    #[test]
    fn test_generate_tapers_before_bending() {
        let dir = tempdir().expect("Failed to create temp dir");
        let output = dir.path().join("shape.obj");
        let shape = ShapeArgs {
            family: Family::Superellipsoid,
            epsilon: Some(vec![0.5, 0.5, 0.5]),
            a: None,
            scale: 1.0,
            coupled_taper: vec![0.0, 0.0],
            blend: vec![0.0, 0.0, 0.0],
        };
        run_generate(&shape, 6, Some(0.5), Some([0.3, 0.4].as_slice()), None, &output).unwrap();

        let grid = superellipsoid([0.5; 3], [1.0; 3]).sample(6).unwrap();
        let taper = AxialTaper::new(0.5);
        let bend = AxialBend::new(0.3, 0.4).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();

        assert_eq!(
            written,
            mesh_text(dir.path(), "expected.obj", &bend.apply(&taper.apply(&grid)))
        );
        assert_ne!(
            written,
            mesh_text(dir.path(), "reversed.obj", &taper.apply(&bend.apply(&grid)))
        );
    }
}
