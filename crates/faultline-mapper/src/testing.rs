//! Test doubles for the metric and log sinks

use std::fmt;
use std::sync::{Arc, Mutex};

use faultline_core::RequestContext;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::metrics::ErrorMetrics;

pub fn context(uri: &str) -> RequestContext {
    RequestContext::new(http::Method::GET, uri.parse().unwrap())
}

#[derive(Default)]
pub struct RecordingMetrics {
    statuses: Mutex<Vec<String>>,
}

impl RecordingMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().clone()
    }
}

impl ErrorMetrics for RecordingMetrics {
    fn error(&self, status: &str) {
        self.statuses.lock().unwrap().push(status.to_owned());
    }
}

/// Fields of one captured error-level event
#[derive(Debug, Clone, Default)]
pub struct LoggedError {
    pub kind: Option<String>,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl Visit for LoggedError {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{value:?}");
        match field.name() {
            "kind" => self.kind = Some(value),
            "url" => self.url = Some(value),
            "error" => self.error = Some(value),
            _ => {}
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        if field.name() == "error" {
            self.error = Some(value.to_string());
        }
    }
}

struct CaptureLayer(Arc<Mutex<Vec<LoggedError>>>);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::ERROR {
            return;
        }

        let mut logged = LoggedError::default();
        event.record(&mut logged);
        self.0.lock().unwrap().push(logged);
    }
}

/// Run `f` with a subscriber that captures error-level events
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<LoggedError>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(Arc::clone(&events)));

    let output = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();

    (output, captured)
}
