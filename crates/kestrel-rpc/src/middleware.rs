//! The per-request pipeline.
//!
//! Every concrete route passes through here: request logging, body
//! reading, the permission gate, handler dispatch, panic containment, and
//! error-to-wire translation. Handlers never write to the transport
//! directly; this module is the single translator from internal fault to
//! wire-visible error, and nothing past it may see a failure.

use crate::config::RpcConfig;
use crate::error::{ErrorKind, RpcError};
use crate::handlers::Handlers;
use crate::permissions::RpcMode;
use crate::response::{error_envelope, failure};
use crate::routes::RouteEntry;
use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info};

/// Largest request body the pipeline will read, in bytes.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Run one concrete route through the pipeline.
///
/// The response is fully formed here, body and status both; the caller
/// only puts it on the wire.
pub async fn dispatch(
    config: &RpcConfig,
    handlers: &Handlers,
    entry: &RouteEntry,
    method: &Method,
    path: &str,
    body: Body,
) -> Response {
    let (status, body) = run(config, handlers, entry, method, path, body).await;
    finalize(config, status, body)
}

async fn run(
    config: &RpcConfig,
    handlers: &Handlers,
    entry: &RouteEntry,
    method: &Method,
    path: &str,
    body: Body,
) -> (StatusCode, Value) {
    debug!("Incoming {} request: {}", method, path);

    let raw = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                failure("Failed to read request body"),
            );
        }
    };

    let parsed = if entry.body_required {
        match serde_json::from_slice::<Value>(&raw) {
            Ok(value) => value,
            Err(_) => {
                // Diagnostic only; the wire body below stays fixed no
                // matter what the client sent.
                if !raw.is_empty() {
                    info!(
                        "Warning: received body is not JSON encoded!\n\
                         Key/value parameters are NOT supported.\n\
                         Body:\n{}",
                        String::from_utf8_lossy(&raw)
                    );
                }

                return (
                    StatusCode::BAD_REQUEST,
                    failure("Failed to parse request body as JSON"),
                );
            }
        }
    } else {
        Value::Null
    };

    if entry.permission > config.mode {
        return (
            StatusCode::FORBIDDEN,
            failure(RpcMode::denial_message(entry.permission)),
        );
    }

    // Handlers return classified errors as values; a panic is the only
    // thing left to catch, and it must not cross the transport.
    let outcome = AssertUnwindSafe(handlers.dispatch(entry.handler, &parsed))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok((status, body))) => (status, body),
        Ok(Err(rpc_error)) => error_response(&rpc_error),
        Err(panic) => error_response(&RpcError::internal(panic_message(panic))),
    }
}

/// Map a classified handler failure onto the wire.
fn error_response(rpc_error: &RpcError) -> (StatusCode, Value) {
    match rpc_error.kind {
        ErrorKind::BadArgument => {
            error!(
                "Caught JSON exception, likely missing required json parameter: {}",
                rpc_error.message
            );

            (StatusCode::BAD_REQUEST, failure(rpc_error.message.clone()))
        }
        // Handlers propose a status on success only; a rejection always
        // goes out as a 400 with the coded envelope.
        ErrorKind::Rejection => (
            StatusCode::BAD_REQUEST,
            error_envelope(rpc_error.code, &rpc_error.message),
        ),
        ErrorKind::Internal => {
            error!("Caught unexpected exception: {}", rpc_error.message);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                failure(format!("Internal server error: {}", rpc_error.message)),
            )
        }
    }
}

fn finalize(config: &RpcConfig, status: StatusCode, body: Value) -> Response {
    let mut response = (status, Json(body)).into_response();

    if let Some(origin) = config.cors_header() {
        response
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }

    response
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic in handler".to_string()
    }
}
