//! Error translation for HTTP services
//!
//! Turns any failure that escaped a request handler into either an error
//! response or, when the client is already gone, a log line. The pieces:
//!
//! - [`classify`] decides whether a response can still be written
//! - [`StatusTable`] maps failure kinds to statuses
//! - [`Responder`] logs, counts and builds the [`ErrorResponse`]
//! - [`HandlerChain`] orders the handlers that tie them together

#![allow(clippy::must_use_candidate)]

pub mod chain;
pub mod classify;
pub mod identity;
mod metrics;
mod responder;
mod response;
mod status;
#[cfg(test)]
mod testing;

use faultline_core::{Failure, RequestContext};

pub use chain::{FailureHandler, HandlerChain};
pub use classify::{Classification, classify};
pub use metrics::{ErrorMetrics, OtelErrorMetrics};
pub use responder::Responder;
pub use response::{ErrorResponse, Outcome};
pub use status::{Mapping, StatusTable, is_retryable};

/// Entry point the transport calls for every failed request
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct ErrorMapper {
    responder: Responder,
    chain: HandlerChain,
}

impl ErrorMapper {
    /// Mapper with the default handler chain
    pub fn new(responder: Responder) -> Self {
        Self::with_chain(responder, HandlerChain::with_defaults())
    }

    pub const fn with_chain(responder: Responder, chain: HandlerChain) -> Self {
        Self { responder, chain }
    }

    pub const fn responder(&self) -> &Responder {
        &self.responder
    }

    /// Resolve a failure into its outcome
    ///
    /// Never fails. A failure no handler claims is answered with the
    /// default status.
    pub fn handle(&self, ctx: &RequestContext, failure: &Failure) -> Outcome {
        let Some(handler) = self.chain.select(failure) else {
            tracing::warn!(kind = %failure.kind(), "no failure handler matched");
            return self.responder.respond_internal(ctx, failure);
        };

        tracing::debug!(handler = handler.name(), kind = %failure.kind(), "dispatching failure");
        handler.handle(&self.responder, ctx, failure)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use faultline_core::FailureKind;
    use http::StatusCode;

    use super::*;
    use crate::testing::{RecordingMetrics, capture_logs, context};

    fn mapper(metrics: &Arc<RecordingMetrics>) -> ErrorMapper {
        ErrorMapper::new(Responder::new("node-1", StatusTable::builtin(), metrics.clone()))
    }

    #[test]
    fn not_found_scenario() {
        let metrics = RecordingMetrics::new();
        let failure = Failure::not_found("job 42 missing");

        let outcome = mapper(&metrics).handle(&context("/api/jobs/42"), &failure);

        assert_eq!(
            outcome,
            Outcome::Respond {
                status: StatusCode::NOT_FOUND,
                body: ErrorResponse {
                    instance: "node-1".to_owned(),
                    status: 404,
                    message: Some("job 42 missing".to_owned()),
                    retryable: false,
                },
            }
        );
    }

    #[test]
    fn transient_scenario() {
        let metrics = RecordingMetrics::new();
        let failure = Failure::transient("db unavailable");

        let outcome = mapper(&metrics).handle(&context("/api/jobs"), &failure);

        let body = outcome.body().unwrap();
        assert_eq!(body.status, 500);
        assert!(body.retryable);
        assert_eq!(body.message.as_deref(), Some("db unavailable"));
        assert_eq!(metrics.statuses(), vec!["500"]);
    }

    #[test]
    fn unregistered_kind_scenario() {
        let metrics = RecordingMetrics::new();
        let failure = Failure::custom("Boom", "boom");

        let outcome = mapper(&metrics).handle(&context("/"), &failure);

        let body = outcome.body().unwrap();
        assert_eq!((body.status, body.message.as_deref(), body.retryable), (500, Some("boom"), false));
    }

    #[test]
    fn every_known_kind_maps_through_the_chain() {
        let metrics = RecordingMetrics::new();
        let mapper = mapper(&metrics);

        let cases = [
            (FailureKind::NotFound, 404),
            (FailureKind::Conflict, 409),
            (FailureKind::InvalidArgument, 400),
            (FailureKind::InvalidFormat, 500),
            (FailureKind::NoResourceFound, 404),
            (FailureKind::Transient, 500),
        ];

        for (kind, status) in cases {
            let failure = Failure::new(kind.clone()).with_message("m");
            let outcome = mapper.handle(&context("/"), &failure);
            assert_eq!(outcome.body().map(|b| b.status), Some(status), "{kind}");
        }

        assert_eq!(metrics.statuses(), vec!["404", "409", "400", "500", "404", "500"]);
    }

    #[test]
    fn nested_client_abort_produces_no_response_or_metric() {
        let metrics = RecordingMetrics::new();
        let mapper = mapper(&metrics);
        let failure = Failure::closed_channel().with_source(Failure::client_abort());

        let (outcome, logs) = capture_logs(|| mapper.handle(&context("/api/stream"), &failure));

        assert_eq!(outcome, Outcome::Suppressed);
        assert!(metrics.statuses().is_empty());
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].kind.as_deref(), Some("ClientAbort"));
        assert_eq!(logs[0].url.as_deref(), Some("/api/stream"));
    }

    #[test]
    fn direct_client_abort_produces_no_response_or_metric() {
        let metrics = RecordingMetrics::new();
        let mapper = mapper(&metrics);
        let failure = Failure::from(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));

        let (outcome, logs) = capture_logs(|| mapper.handle(&context("/"), &failure));

        assert_eq!(outcome, Outcome::Suppressed);
        assert!(metrics.statuses().is_empty());
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn closed_channel_without_abort_is_answered() {
        let metrics = RecordingMetrics::new();
        let mapper = mapper(&metrics);
        let failure = Failure::closed_channel().with_message("channel closed");

        let (outcome, logs) = capture_logs(|| mapper.handle(&context("/"), &failure));

        assert_eq!(outcome.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(metrics.statuses(), vec!["500"]);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].kind.as_deref(), Some("ClosedChannel"));
    }

    #[test]
    fn generic_failures_log_and_count_once() {
        let metrics = RecordingMetrics::new();
        let mapper = mapper(&metrics);
        let failure = Failure::invalid_argument("limit must be positive");

        let (_, logs) = capture_logs(|| mapper.handle(&context("/api/jobs?limit=-1"), &failure));

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].url.as_deref(), Some("/api/jobs?limit=-1"));
        assert_eq!(metrics.statuses(), vec!["400"]);
    }

    #[test]
    fn instance_is_stable_across_invocations() {
        let metrics = RecordingMetrics::new();
        let mapper = ErrorMapper::new(Responder::new(
            identity::server_id(),
            StatusTable::builtin(),
            metrics.clone(),
        ));

        let first = mapper.handle(&context("/"), &Failure::conflict("a"));
        let second = mapper.handle(&context("/"), &Failure::custom("Other", "b"));

        assert_eq!(first.body().unwrap().instance, identity::server_id());
        assert_eq!(second.body().unwrap().instance, identity::server_id());
    }

    #[test]
    fn unclaimed_failures_fall_back_to_internal_error() {
        let metrics = RecordingMetrics::new();
        let mapper = ErrorMapper::with_chain(
            Responder::new("node-1", StatusTable::builtin(), metrics.clone()),
            HandlerChain::empty(),
        );

        let outcome = mapper.handle(&context("/"), &Failure::not_found("x"));

        assert_eq!(outcome.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(metrics.statuses(), vec!["500"]);
    }
}
