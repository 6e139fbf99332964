use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use faultline_core::RequestContext;
use faultline_mapper::ErrorMapper;

use crate::error::{RaisedFailure, outcome_response};

/// Middleware that translates raised failures into error responses
///
/// Captures the request context up front, runs the inner service, and when
/// the response carries a raised failure replaces it with the outcome of the
/// mapper. Responses without a failure pass through untouched.
pub async fn error_mapper_middleware(State(mapper): State<Arc<ErrorMapper>>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let ctx = RequestContext::from_parts(&parts);

    let mut response = next.run(Request::from_parts(parts, body)).await;

    match response.extensions_mut().remove::<RaisedFailure>() {
        Some(RaisedFailure(failure)) => outcome_response(mapper.handle(&ctx, &failure)),
        None => response,
    }
}
