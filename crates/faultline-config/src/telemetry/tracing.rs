use serde::Deserialize;

use super::exporters::ExporterConfig;

/// Tracing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TracingConfig {
    /// Fraction of root spans to sample (0.0 to 1.0)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
    /// Follow the sampling decision of the parent span when present
    #[serde(default = "default_true")]
    pub parent_based: bool,
    /// Override the shared exporter for spans
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
}

const fn default_sampling_rate() -> f64 {
    1.0
}

const fn default_true() -> bool {
    true
}
