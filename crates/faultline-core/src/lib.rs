//! Failure model shared by the error-translation layer and the handlers that raise failures

#![allow(clippy::must_use_candidate)]

mod context;
mod failure;
mod kind;

pub use context::RequestContext;
pub use failure::{BoxError, Failure};
pub use kind::FailureKind;
