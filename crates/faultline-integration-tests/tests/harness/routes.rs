//! Handlers that raise failures on demand

use std::collections::HashMap;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::routing::{get, post};
use faultline_core::{Failure, FailureKind};
use faultline_server::ApiError;
use serde::Deserialize;

/// `GET /fail/{kind}?message=..` raises a failure of the named kind
pub fn failure_routes() -> Router {
    Router::new()
        .route("/fail/{kind}", get(raise))
        .route("/disconnect", get(disconnect))
        .route("/disconnect/nested", get(nested_disconnect))
        .route("/panic", get(explode))
        .route("/jobs", post(create_job))
        .route("/jobs/{id}", get(job))
}

async fn raise(Path(kind): Path<String>, Query(query): Query<HashMap<String, String>>) -> Result<(), ApiError> {
    let failure = Failure::new(FailureKind::from_name(&kind));
    Err(ApiError(match query.get("message") {
        Some(message) => failure.with_message(message.clone()),
        None => failure,
    }))
}

async fn disconnect() -> Result<(), ApiError> {
    Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset by peer").into())
}

async fn nested_disconnect() -> Result<(), ApiError> {
    Err(ApiError(Failure::closed_channel().with_source(Failure::client_abort())))
}

async fn explode() -> &'static str {
    panic!("handler exploded")
}

#[derive(Debug, Deserialize)]
struct NewJob {
    #[allow(dead_code)]
    priority: u8,
}

async fn create_job(body: Bytes) -> Result<&'static str, ApiError> {
    let _job: NewJob = serde_json::from_slice(&body)?;
    Ok("created")
}

async fn job(Path(id): Path<u64>) -> Result<String, ApiError> {
    match id {
        1 => Ok("job 1".to_owned()),
        2 => Err(Failure::conflict("job 2 is locked").into()),
        _ => Err(Failure::not_found(format!("job {id} missing")).into()),
    }
}
