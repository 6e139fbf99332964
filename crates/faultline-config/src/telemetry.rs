pub mod exporters;
pub mod metrics;
pub mod tracing;

use std::collections::HashMap;

use serde::Deserialize;

use self::{exporters::ExporterConfig, metrics::MetricsConfig, tracing::TracingConfig};

/// Telemetry configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name reported in resource metadata
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Additional resource attributes
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    /// Exporter shared by tracing and metrics unless overridden
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
    #[serde(default)]
    pub tracing: Option<TracingConfig>,
    #[serde(default)]
    pub metrics: Option<MetricsConfig>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            resource_attributes: HashMap::new(),
            exporter: None,
            tracing: None,
            metrics: None,
        }
    }
}

impl TelemetryConfig {
    /// Exporter used for spans
    pub fn tracing_exporter(&self) -> Option<&ExporterConfig> {
        self.tracing
            .as_ref()
            .and_then(|t| t.exporter.as_ref())
            .or(self.exporter.as_ref())
    }

    /// Exporter used for metrics
    pub fn metrics_exporter(&self) -> Option<&ExporterConfig> {
        self.metrics
            .as_ref()
            .and_then(|m| m.exporter.as_ref())
            .or(self.exporter.as_ref())
    }

    /// Whether any OTLP export is configured
    pub fn has_exporter(&self) -> bool {
        self.tracing_exporter().is_some() || self.metrics_exporter().is_some()
    }
}

fn default_service_name() -> String {
    "faultline".to_owned()
}
