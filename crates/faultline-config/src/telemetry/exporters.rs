use serde::Deserialize;
use url::Url;

/// OTLP exporter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    /// OTLP collector endpoint
    pub endpoint: Url,
    #[serde(default)]
    pub protocol: ExportProtocol,
    /// Seconds between periodic metric exports
    #[serde(default = "default_export_interval")]
    pub export_interval: u64,
}

/// OTLP wire protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    #[default]
    Grpc,
    HttpProto,
}

const fn default_export_interval() -> u64 {
    30
}
