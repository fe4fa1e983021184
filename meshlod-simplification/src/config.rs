//! Pipeline configuration

use meshlod_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-pass tolerance coefficients applied to the squared bounding extent.
///
/// Empirical values; each pass trades more fidelity for size than the last.
pub const DEFAULT_COEFFICIENTS: [f64; 3] = [1e-6, 7e-6, 15e-6];

/// Configuration for the decimation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// One coefficient per pass; pass `i` runs at `extent^2 * coefficients[i]`
    pub coefficients: Vec<f64>,
    /// Run passes on the rayon thread pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            coefficients: DEFAULT_COEFFICIENTS.to_vec(),
            parallel: true,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with the default three-pass ladder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-pass coefficients
    pub fn with_coefficients(mut self, coefficients: impl Into<Vec<f64>>) -> Self {
        self.coefficients = coefficients.into();
        self
    }

    /// Enable or disable parallel passes
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of passes this configuration produces
    pub fn pass_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Tolerance ladder for a mesh whose largest bounding-box side is `extent`
    pub fn tolerances(&self, extent: f64) -> Vec<f64> {
        let scale = extent * extent;
        self.coefficients.iter().map(|c| scale * c).collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(Error::Config(
                "at least one pass coefficient is required".to_string(),
            ));
        }
        if let Some(bad) = self
            .coefficients
            .iter()
            .find(|c| !c.is_finite() || **c < 0.0)
        {
            return Err(Error::Config(format!(
                "pass coefficients must be finite and non-negative, got {}",
                bad
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.coefficients, vec![1e-6, 7e-6, 15e-6]);
        assert!(config.parallel);
        assert_eq!(config.pass_count(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tolerances_scale_with_extent_squared() {
        let tolerances = PipelineConfig::default().tolerances(10.0);
        assert_eq!(tolerances.len(), 3);
        assert_relative_eq!(tolerances[0], 1e-4, max_relative = 1e-12);
        assert_relative_eq!(tolerances[1], 7e-4, max_relative = 1e-12);
        assert_relative_eq!(tolerances[2], 15e-4, max_relative = 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_coefficients() {
        assert!(PipelineConfig::new().with_coefficients(Vec::<f64>::new()).validate().is_err());
        assert!(PipelineConfig::new()
            .with_coefficients(vec![1e-6, f64::NAN])
            .validate()
            .is_err());
        assert!(PipelineConfig::new()
            .with_coefficients(vec![-1.0])
            .validate()
            .is_err());
    }

    #[test]
    fn test_json_round_trip_with_missing_fields() {
        let config: PipelineConfig = serde_json::from_str(r#"{ "parallel": false }"#).unwrap();
        assert!(!config.parallel);
        assert_eq!(config.coefficients, DEFAULT_COEFFICIENTS.to_vec());

        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
