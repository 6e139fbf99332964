use std::any::Any;
use std::sync::Arc;

use axum::Json;
use axum::response::{IntoResponse, Response};
use faultline_core::Failure;
use faultline_mapper::Outcome;
use http::StatusCode;

/// Failure returned from an axum handler
///
/// Any `E: Into<Failure>` converts with `?`. The failure travels to the
/// error middleware inside the response extensions, where it is mapped
/// with the request context in hand.
#[derive(Debug)]
pub struct ApiError(pub Failure);

impl<E> From<E> for ApiError
where
    E: Into<Failure>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(RaisedFailure(Arc::new(self.0)));
        response
    }
}

/// Failure awaiting translation, carried in response extensions
#[derive(Clone)]
pub(crate) struct RaisedFailure(pub(crate) Arc<Failure>);

/// Marks a response that was never delivered because the client left
#[derive(Debug, Clone, Copy)]
pub struct Suppressed;

/// Non-standard status logged for requests the client abandoned
pub fn client_closed_request() -> StatusCode {
    StatusCode::from_u16(CLIENT_CLOSED_REQUEST).unwrap_or(StatusCode::BAD_REQUEST)
}

const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Turn a mapper outcome into the response handed back to the transport
pub fn outcome_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Respond { status, body } => (status, Json(body)).into_response(),
        Outcome::Suppressed => {
            let mut response = client_closed_request().into_response();
            response.extensions_mut().insert(Suppressed);
            response
        }
    }
}

/// Convert a caught handler panic into a raised failure
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| "handler panicked".to_owned());

    ApiError(Failure::custom("Panic", message)).into_response()
}
