use std::error::Error as StdError;
use std::sync::Arc;

use faultline_core::{Failure, FailureKind, RequestContext};

use crate::classify::kind_of;
use crate::metrics::ErrorMetrics;
use crate::response::{ErrorResponse, Outcome};
use crate::status::{Mapping, StatusTable, is_retryable};

/// Produces the side effects of a handled failure
///
/// Every handled failure is logged exactly once. Answerable failures are
/// also counted and turned into an [`ErrorResponse`]; failures whose
/// connection is gone are only logged.
pub struct Responder {
    instance: Arc<str>,
    table: StatusTable,
    metrics: Arc<dyn ErrorMetrics>,
}

impl Responder {
    pub fn new(instance: impl Into<Arc<str>>, table: StatusTable, metrics: Arc<dyn ErrorMetrics>) -> Self {
        Self {
            instance: instance.into(),
            table,
            metrics,
        }
    }

    /// Identifier written to the `instance` field
    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub const fn table(&self) -> &StatusTable {
        &self.table
    }

    /// Answer a failure with the status its kind maps to
    pub fn respond(&self, ctx: &RequestContext, failure: &Failure) -> Outcome {
        let mapping = self.table.map(failure.kind());
        self.respond_with(ctx, failure, mapping)
    }

    /// Answer a failure with the default status regardless of its kind
    pub fn respond_internal(&self, ctx: &RequestContext, failure: &Failure) -> Outcome {
        let mapping = Mapping {
            status: StatusTable::DEFAULT_STATUS,
            retryable: is_retryable(failure.kind()),
        };
        self.respond_with(ctx, failure, mapping)
    }

    /// Record a failure that cannot be answered
    ///
    /// `cause` is the disconnect error, which may sit below the failure that
    /// was raised.
    pub fn suppress(&self, ctx: &RequestContext, cause: &(dyn StdError + 'static)) -> Outcome {
        log_failure(ctx, &kind_of(cause), cause);
        Outcome::Suppressed
    }

    fn respond_with(&self, ctx: &RequestContext, failure: &Failure, mapping: Mapping) -> Outcome {
        log_failure(ctx, failure.kind(), failure);

        let body = ErrorResponse {
            instance: self.instance.to_string(),
            status: mapping.status.as_u16(),
            message: failure.message().map(str::to_owned),
            retryable: mapping.retryable,
        };

        self.metrics.error(mapping.status.as_str());

        Outcome::Respond {
            status: mapping.status,
            body,
        }
    }
}

fn log_failure(ctx: &RequestContext, kind: &FailureKind, error: &(dyn StdError + 'static)) {
    tracing::error!(kind = %kind, url = %ctx.path(), error, "request failed");
}
