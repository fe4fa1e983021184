//! Level-of-detail pipeline
//!
//! Runs a decimator once per configured pass against the same input mesh.
//! Tolerances grow with the square of the mesh's largest bounding-box side,
//! so the ladder adapts to the model's scale. Passes never feed each other:
//! every pass starts from the original attribute data.

use crate::clustering::ClusterDecimator;
use crate::config::PipelineConfig;
use crate::report::{PassReport, PassReporter};
use crate::MeshDecimator;
use meshlod_core::{Mesh, Result};
use rayon::prelude::*;
use tracing::debug;

/// Builds a ladder of decimated meshes from one input
#[derive(Debug, Clone)]
pub struct DecimationPipeline<D = ClusterDecimator> {
    config: PipelineConfig,
    decimator: D,
}

impl DecimationPipeline<ClusterDecimator> {
    /// Create a pipeline using the clustering decimator
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_decimator(config, ClusterDecimator)
    }
}

impl Default for DecimationPipeline<ClusterDecimator> {
    fn default() -> Self {
        Self {
            config: PipelineConfig::default(),
            decimator: ClusterDecimator,
        }
    }
}

impl<D> DecimationPipeline<D>
where
    D: MeshDecimator + Sync,
{
    /// Create a pipeline around a custom decimator
    pub fn with_decimator(config: PipelineConfig, decimator: D) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, decimator })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Per-pass tolerances for `mesh`, in pass order
    pub fn tolerances(&self, mesh: &Mesh) -> Vec<f64> {
        let extent = mesh.bounding_box().max_extent();
        self.config.tolerances(extent)
    }

    /// Decimate `mesh` once per pass and return the results in pass order.
    ///
    /// `reporter` sees each pass as it is handed back. With parallel passes
    /// enabled the reports are delivered after all passes have joined, still
    /// in pass order. The first failing pass aborts the run.
    #[tracing::instrument(
        level = "debug",
        name = "decimation_pipeline",
        skip_all,
        fields(vertices = mesh.vertex_count(), passes = self.config.pass_count())
    )]
    pub fn run(&self, mesh: &Mesh, reporter: &mut dyn PassReporter) -> Result<Vec<Mesh>> {
        let tolerances = self.tolerances(mesh);
        debug!(?tolerances, parallel = self.config.parallel, "derived pass tolerances");

        let mut levels = Vec::with_capacity(tolerances.len());

        if self.config.parallel {
            let results: Vec<Result<Mesh>> = tolerances
                .par_iter()
                .map(|&tolerance| self.decimator.decimate(mesh, tolerance))
                .collect();

            for (pass, (tolerance, result)) in tolerances.iter().zip(results).enumerate() {
                let level = result?;
                reporter.report(&PassReport::new(pass + 1, *tolerance, &level));
                levels.push(level);
            }
        } else {
            for (pass, &tolerance) in tolerances.iter().enumerate() {
                let level = self.decimator.decimate(mesh, tolerance)?;
                reporter.report(&PassReport::new(pass + 1, tolerance, &level));
                levels.push(level);
            }
        }

        Ok(levels)
    }
}
