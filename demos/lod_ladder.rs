//! Build a level-of-detail ladder for a procedural terrain patch
//!
//! The terrain is flat shaded: every triangle carries its own face normal,
//! so the demo shows how per-vertex attributes hold clustering back along
//! creases while flat regions collapse freely.
//!
//! ```text
//! cargo run -p meshlod-demos --bin lod_ladder -- --size 128 --json
//! RUST_LOG=debug cargo run -p meshlod-demos --bin lod_ladder -- --config ladder.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use meshlod::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lod_ladder", about = "Decimate a procedural terrain into an LOD ladder")]
struct Args {
    /// Terrain quads per side
    #[arg(long, default_value_t = 64)]
    size: usize,

    /// Height of the terrain relative to its width
    #[arg(long, default_value_t = 0.15)]
    relief: f32,

    /// Drop per-face normals and cluster on position alone
    #[arg(long)]
    positions_only: bool,

    /// JSON pipeline configuration (`coefficients`, `parallel`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run passes one after another instead of on the thread pool
    #[arg(long)]
    sequential: bool,

    /// Print the pass reports as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading pipeline config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing pipeline config {}", path.display()))
}

fn height(x: f32, y: f32, relief: f32) -> f32 {
    let ridge = (x * 9.0).sin() * (y * 7.0).cos();
    let swell = ((x - 0.5).powi(2) + (y - 0.5).powi(2)).sqrt() * 4.0;
    relief * (0.6 * ridge + 0.4 * swell.cos())
}

/// Non-indexed terrain over the unit square with one normal per triangle
fn make_terrain(size: usize, relief: f32) -> Result<Mesh> {
    let size = size.max(1);
    let step = 1.0 / size as f32;
    let corner = |x: usize, y: usize| {
        let (fx, fy) = (x as f32 * step, y as f32 * step);
        Point3::new(fx, fy, height(fx, fy, relief))
    };

    let mut positions = Vec::with_capacity(size * size * 18);
    let mut normals = Vec::with_capacity(size * size * 18);
    for y in 0..size {
        for x in 0..size {
            let quad = [corner(x, y), corner(x + 1, y), corner(x + 1, y + 1), corner(x, y + 1)];
            for [a, b, c] in [[0, 1, 2], [0, 2, 3]] {
                let (pa, pb, pc) = (quad[a], quad[b], quad[c]);
                let normal = (pb - pa).cross(&(pc - pa)).normalize();
                for p in [pa, pb, pc] {
                    positions.extend_from_slice(&[p.x, p.y, p.z]);
                    normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
                }
            }
        }
    }

    Ok(Mesh::new()
        .with_attribute(ATTRIBUTE_POSITION, AttributeBuffer::new(positions, 3, false)?)
        .with_attribute(ATTRIBUTE_NORMAL, AttributeBuffer::new(normals, 3, false)?))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = load_config(args.config.as_ref())?;
    if args.sequential {
        config.parallel = false;
    }
    let pipeline = DecimationPipeline::new(config)?;

    let mut mesh = make_terrain(args.size, args.relief)?;
    if args.positions_only {
        mesh.remove_attribute(ATTRIBUTE_NORMAL);
    }
    tracing::info!(
        vertices = mesh.vertex_count(),
        bytes = mesh.byte_size(),
        extent = mesh.bounding_box().max_extent(),
        "generated terrain"
    );

    let mut reports = CollectingReporter::new();
    let levels = {
        let mut tracing_reporter = TracingReporter;
        let mut both = |report: &PassReport| {
            tracing_reporter.report(report);
            reports.report(report);
        };
        pipeline.run(&mesh, &mut both)?
    };

    for (level, report) in levels.iter().zip(&reports.reports) {
        let ratio = level.vertex_count() as f64 / mesh.vertex_count() as f64;
        tracing::info!(pass = report.pass, ratio, "kept vertices");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports.reports)?);
    }

    Ok(())
}
