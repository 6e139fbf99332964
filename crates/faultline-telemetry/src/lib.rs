//! Telemetry for Faultline
//!
//! Structured logging through `tracing`, with optional OTLP export of spans
//! and metrics

#![allow(clippy::must_use_candidate)]

mod metadata;
pub mod metrics;

use std::time::Duration;

use faultline_config::TelemetryConfig;
use faultline_config::telemetry::exporters::{ExportProtocol, ExporterConfig};
use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;

pub use opentelemetry::{
    KeyValue,
    metrics::{Counter, Meter},
};

/// Instrumentation scope name for everything Faultline records
pub const SCOPE: &str = "faultline";

/// Meter for Faultline instruments
///
/// Resolves against the global provider, so instruments created before
/// [`init`] runs are no-ops
pub fn meter() -> Meter {
    global::meter(SCOPE)
}

/// Keeps the OTLP providers alive and shuts them down on drop
#[derive(Default)]
pub struct TelemetryGuard {
    meter_provider: Option<SdkMeterProvider>,
    tracer_provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Push pending metrics to the exporter now
    ///
    /// # Errors
    ///
    /// Returns an error if the meter provider fails to flush
    pub fn force_flush(&self) -> anyhow::Result<()> {
        if let Some(ref provider) = self.meter_provider {
            provider
                .force_flush()
                .map_err(|e| anyhow::anyhow!("failed to flush metrics: {e}"))?;
        }
        Ok(())
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.meter_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown meter provider: {e}");
        }
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown tracer provider: {e}");
        }
    }
}

/// Install the global subscriber and, when configured, the OTLP providers
///
/// The returned guard must be held for the lifetime of the process.
///
/// # Errors
///
/// Returns an error if an exporter cannot be built or a global subscriber
/// is already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let mut guard = TelemetryGuard::default();
    let config = config.filter(|c| c.has_exporter());
    let resource = config.map(metadata::build_resource);

    if let (Some(config), Some(resource)) = (config, resource.clone())
        && let Some(exporter) = config.metrics_exporter()
    {
        let provider = init_metrics(exporter, resource)?;
        global::set_meter_provider(provider.clone());
        guard.meter_provider = Some(provider);
    }

    let otel_layer = match (config, resource) {
        (Some(config), Some(resource)) if config.tracing_exporter().is_some() => {
            let provider = init_tracer(config, resource)?;
            let tracer = provider.tracer(SCOPE);
            global::set_tracer_provider(provider.clone());
            guard.tracer_provider = Some(provider);
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

fn init_metrics(exporter_config: &ExporterConfig, resource: opentelemetry_sdk::Resource) -> anyhow::Result<SdkMeterProvider> {
    use opentelemetry_otlp::MetricExporter;
    use opentelemetry_sdk::metrics::PeriodicReader;

    let exporter = match exporter_config.protocol {
        ExportProtocol::Grpc => MetricExporter::builder()
            .with_tonic()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build(),
        ExportProtocol::HttpProto => MetricExporter::builder()
            .with_http()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build metrics exporter: {e}"))?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(exporter_config.export_interval))
        .build();

    Ok(SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build())
}

fn init_tracer(config: &TelemetryConfig, resource: opentelemetry_sdk::Resource) -> anyhow::Result<SdkTracerProvider> {
    use opentelemetry_otlp::SpanExporter;
    use opentelemetry_sdk::trace::Sampler;

    let exporter_config = config
        .tracing_exporter()
        .ok_or_else(|| anyhow::anyhow!("no trace exporter configured"))?;

    let exporter = match exporter_config.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build(),
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(exporter_config.endpoint.as_str())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build span exporter: {e}"))?;

    let sampling_rate = config.tracing.as_ref().map_or(1.0, |t| t.sampling_rate);
    let sampler = if sampling_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if sampling_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(sampling_rate)
    };

    let sampler = if config.tracing.as_ref().is_none_or(|t| t.parent_based) {
        Sampler::ParentBased(Box::new(sampler))
    } else {
        sampler
    };

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(sampler)
        .with_batch_exporter(exporter)
        .build())
}
