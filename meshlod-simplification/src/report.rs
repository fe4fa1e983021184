//! Per-pass progress reporting

use meshlod_core::Mesh;
use serde::Serialize;
use tracing::info;

/// Statistics for one finished decimation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassReport {
    /// 1-based pass number
    pub pass: usize,
    pub tolerance: f64,
    /// Unique vertices left after clustering
    pub vertex_count: usize,
    pub index_count: usize,
    /// Approximate size of the pass output in bytes
    pub byte_size: usize,
}

impl PassReport {
    pub fn new(pass: usize, tolerance: f64, mesh: &Mesh) -> Self {
        Self {
            pass,
            tolerance,
            vertex_count: mesh.vertex_count(),
            index_count: mesh.effective_vertex_count(),
            byte_size: mesh.byte_size(),
        }
    }
}

/// Receives a [`PassReport`] after each pipeline pass, in pass order
pub trait PassReporter {
    fn report(&mut self, report: &PassReport);
}

impl<F> PassReporter for F
where
    F: FnMut(&PassReport),
{
    fn report(&mut self, report: &PassReport) {
        self(report)
    }
}

/// Emits one `info` event per pass
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl PassReporter for TracingReporter {
    fn report(&mut self, report: &PassReport) {
        info!(
            pass = report.pass,
            tolerance = report.tolerance,
            vertices = report.vertex_count,
            indices = report.index_count,
            bytes = report.byte_size,
            "decimation pass complete"
        );
    }
}

/// Keeps every report it receives
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    pub reports: Vec<PassReport>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PassReporter for CollectingReporter {
    fn report(&mut self, report: &PassReport) {
        self.reports.push(report.clone());
    }
}

/// Discards reports
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl PassReporter for NoopReporter {
    fn report(&mut self, _report: &PassReport) {}
}
