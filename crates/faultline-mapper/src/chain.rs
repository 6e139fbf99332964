//! Ordered dispatch of failures to handlers
//!
//! Handlers are tried in ascending priority and the first whose predicate
//! accepts the failure handles it. Built-in priorities leave gaps so more
//! specific handlers can be slotted in without renumbering.

use faultline_core::{Failure, FailureKind, RequestContext};

use crate::classify::{Classification, classify};
use crate::responder::Responder;
use crate::response::Outcome;

/// Priority of [`ClosedChannelHandler`]
pub const CLOSED_CHANNEL_PRIORITY: i32 = 110;
/// Priority of [`ClientAbortHandler`]
pub const CLIENT_ABORT_PRIORITY: i32 = 120;
/// Priority of [`CatchAllHandler`]
pub const CATCH_ALL_PRIORITY: i32 = 1000;

/// A handler for one category of failures
pub trait FailureHandler: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether this handler claims the failure
    fn matches(&self, failure: &Failure) -> bool;

    /// Produce the outcome for a claimed failure
    fn handle(&self, responder: &Responder, ctx: &RequestContext, failure: &Failure) -> Outcome;
}

/// Closed transport channels, which may hide a client abort
pub struct ClosedChannelHandler;

impl FailureHandler for ClosedChannelHandler {
    fn name(&self) -> &'static str {
        "closed_channel"
    }

    fn matches(&self, failure: &Failure) -> bool {
        failure.kind() == &FailureKind::ClosedChannel
    }

    fn handle(&self, responder: &Responder, ctx: &RequestContext, failure: &Failure) -> Outcome {
        match classify(failure) {
            Classification::Unresponsive(cause) => responder.suppress(ctx, cause),
            Classification::Responsive => responder.respond(ctx, failure),
        }
    }
}

/// Client disconnects raised directly
pub struct ClientAbortHandler;

impl FailureHandler for ClientAbortHandler {
    fn name(&self) -> &'static str {
        "client_abort"
    }

    fn matches(&self, failure: &Failure) -> bool {
        failure.kind() == &FailureKind::ClientAbort
    }

    fn handle(&self, responder: &Responder, ctx: &RequestContext, failure: &Failure) -> Outcome {
        // Socket is closed, no response can be returned
        responder.suppress(ctx, failure)
    }
}

/// Everything else
pub struct CatchAllHandler;

impl FailureHandler for CatchAllHandler {
    fn name(&self) -> &'static str {
        "catch_all"
    }

    fn matches(&self, _failure: &Failure) -> bool {
        true
    }

    fn handle(&self, responder: &Responder, ctx: &RequestContext, failure: &Failure) -> Outcome {
        responder.respond(ctx, failure)
    }
}

/// Handlers sorted by priority
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<(i32, Box<dyn FailureHandler>)>,
}

impl HandlerChain {
    /// A chain with no handlers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Closed channel, then client abort, then catch-all
    pub fn with_defaults() -> Self {
        let mut chain = Self::empty();
        chain.register(CLOSED_CHANNEL_PRIORITY, ClosedChannelHandler);
        chain.register(CLIENT_ABORT_PRIORITY, ClientAbortHandler);
        chain.register(CATCH_ALL_PRIORITY, CatchAllHandler);
        chain
    }

    /// Insert a handler
    ///
    /// Handlers sharing a priority run in registration order.
    pub fn register(&mut self, priority: i32, handler: impl FailureHandler + 'static) {
        let at = self.handlers.partition_point(|(existing, _)| *existing <= priority);
        self.handlers.insert(at, (priority, Box::new(handler)));
    }

    /// First handler that claims the failure
    pub fn select(&self, failure: &Failure) -> Option<&dyn FailureHandler> {
        self.handlers
            .iter()
            .map(|(_, handler)| handler.as_ref())
            .find(|handler| handler.matches(failure))
    }

    /// Handler names with their priorities, in evaluation order
    pub fn entries(&self) -> impl Iterator<Item = (i32, &'static str)> + '_ {
        self.handlers.iter().map(|(priority, handler)| (*priority, handler.name()))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
