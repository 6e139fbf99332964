use faultline_telemetry::metrics::{HTTP_SERVER_ERROR_COUNT, STATUS_CODE_ATTRIBUTE};
use faultline_telemetry::{Counter, KeyValue, Meter};

/// Sink for the error counter
pub trait ErrorMetrics: Send + Sync {
    /// Count one error response with the given status code
    fn error(&self, status: &str);
}

/// Error counter backed by an OpenTelemetry instrument
pub struct OtelErrorMetrics {
    counter: Counter<u64>,
}

impl OtelErrorMetrics {
    pub fn new(meter: &Meter) -> Self {
        let counter = meter
            .u64_counter(HTTP_SERVER_ERROR_COUNT)
            .with_description("Failures answered with an error response")
            .build();

        Self { counter }
    }
}

impl Default for OtelErrorMetrics {
    fn default() -> Self {
        Self::new(&faultline_telemetry::meter())
    }
}

impl ErrorMetrics for OtelErrorMetrics {
    fn error(&self, status: &str) {
        self.counter
            .add(1, &[KeyValue::new(STATUS_CODE_ATTRIBUTE, status.to_owned())]);
    }
}
