//! Decides whether a response can still reach the client
//!
//! A client abort means the connection is already torn down. It can arrive
//! directly, or as a cause under a closed-channel failure raised by the
//! transport. Everything else is answerable.

use std::error::Error as StdError;
use std::io;

use faultline_core::{Failure, FailureKind};

/// Upper bound on causes inspected while unwrapping a chain
pub const MAX_CAUSE_DEPTH: usize = 32;

/// Treatment a failure gets from the error layer
#[derive(Debug)]
pub enum Classification<'a> {
    /// Connection is gone, holds the disconnect error for logging
    Unresponsive(&'a (dyn StdError + 'static)),
    /// An error response can still be written
    Responsive,
}

impl Classification<'_> {
    pub const fn is_unresponsive(&self) -> bool {
        matches!(self, Self::Unresponsive(_))
    }
}

/// Classify a failure by its kind and, for closed channels, its causes
pub fn classify(failure: &Failure) -> Classification<'_> {
    match failure.kind() {
        FailureKind::ClientAbort => Classification::Unresponsive(failure),
        FailureKind::ClosedChannel => nested_client_abort(failure).map_or(Classification::Responsive, Classification::Unresponsive),
        _ => Classification::Responsive,
    }
}

/// First client-abort cause below `failure`
///
/// Stops at the first match or after [`MAX_CAUSE_DEPTH`] links.
pub fn nested_client_abort(failure: &Failure) -> Option<&(dyn StdError + 'static)> {
    causes(failure).find(|cause| is_client_abort(*cause))
}

/// Whether an error signals an abrupt client disconnect
pub fn is_client_abort(err: &(dyn StdError + 'static)) -> bool {
    if let Some(failure) = err.downcast_ref::<Failure>() {
        return failure.kind() == &FailureKind::ClientAbort;
    }

    err.downcast_ref::<io::Error>().is_some_and(|e| {
        matches!(
            e.kind(),
            io::ErrorKind::ConnectionAborted | io::ErrorKind::ConnectionReset | io::ErrorKind::BrokenPipe
        )
    })
}

/// Kind reported in logs for an arbitrary error from a cause chain
pub fn kind_of(err: &(dyn StdError + 'static)) -> FailureKind {
    if let Some(failure) = err.downcast_ref::<Failure>() {
        failure.kind().clone()
    } else if is_client_abort(err) {
        FailureKind::ClientAbort
    } else if err.is::<io::Error>() {
        FailureKind::custom("Io")
    } else {
        FailureKind::custom("Unknown")
    }
}

fn causes<'a>(err: &'a (dyn StdError + 'static)) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(err.source(), |&cause| cause.source()).take(MAX_CAUSE_DEPTH)
}
